use chrono::NaiveDate;
use url::Url;

use crate::types::ParcelStatus;

use super::{
    common::{append_opt, QueryCommon},
    Query,
};

/// Default parcel ordering: newest first.
pub const DEFAULT_PARCEL_SORT: &str = "-created_at";

#[derive(Clone, Debug)]
pub struct ParcelQuery {
    pub common: QueryCommon,
    pub status: ParcelStatus,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// Sort key; a leading `-` means descending.
    pub sort: String,
}

impl Default for ParcelQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::default(),
            status: ParcelStatus::All,
            from_date: None,
            to_date: None,
            sort: DEFAULT_PARCEL_SORT.to_string(),
        }
    }
}

impl Query for ParcelQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        match self.status {
            ParcelStatus::Active => {
                url.query_pairs_mut().append_pair("active", "1");
            }
            ParcelStatus::Inactive => {
                url.query_pairs_mut().append_pair("active", "0");
            }
            ParcelStatus::All => {}
        }
        if let Some(from) = self.from_date {
            url.query_pairs_mut()
                .append_pair("from_date", &from.format("%Y-%m-%d").to_string());
        }
        if let Some(to) = self.to_date {
            url.query_pairs_mut()
                .append_pair("to_date", &to.format("%Y-%m-%d").to_string());
        }
        append_opt(&mut url, "sort", Some(self.sort.as_str()));
        url
    }
}

impl ParcelQuery {
    pub fn with_status(mut self, status: ParcelStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_from_date(mut self, from: NaiveDate) -> Self {
        self.from_date = Some(from);
        self
    }

    pub fn with_to_date(mut self, to: NaiveDate) -> Self {
        self.to_date = Some(to);
        self
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = sort.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use url::Url;

    use crate::{
        query::{ParcelQuery, Query},
        types::ParcelStatus,
    };

    #[test]
    fn test_parcel_query() {
        let url = Url::parse("https://example.com/parcels").unwrap();

        insta::assert_snapshot!(
            ParcelQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/parcels?page=1&per_page=12&sort=-created_at"
        );

        insta::assert_snapshot!(
            ParcelQuery::default()
                .with_search("maiz")
                .with_status(ParcelStatus::Active)
                .with_page(2)
                .with_per_page(12)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/parcels?q=maiz&page=2&per_page=12&active=1&sort=-created_at"
        );

        insta::assert_snapshot!(
            ParcelQuery::default()
                .with_status(ParcelStatus::Inactive)
                .with_from_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                .with_to_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
                .with_sort("name")
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/parcels?page=1&per_page=12&active=0&from_date=2024-01-01&to_date=2024-06-30&sort=name"
        );
    }
}
