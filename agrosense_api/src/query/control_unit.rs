use chrono::NaiveDate;
use url::Url;

use crate::types::ControlUnitStatus;

use super::{
    common::{append_flag, QueryCommon},
    Query,
};

#[derive(Clone, Debug, Default)]
pub struct ControlUnitQuery {
    pub common: QueryCommon,
    /// `None` means every status.
    pub status: Option<ControlUnitStatus>,
    pub active: Option<bool>,
    pub from_installed: Option<NaiveDate>,
    pub to_installed: Option<NaiveDate>,
    pub from_seen: Option<NaiveDate>,
    pub to_seen: Option<NaiveDate>,
}

impl Query for ControlUnitQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(status) = self.status {
            url.query_pairs_mut()
                .append_pair("status", &status.to_string());
        }
        append_flag(&mut url, "active", self.active);
        for (key, date) in [
            ("fromInstalled", self.from_installed),
            ("toInstalled", self.to_installed),
            ("fromSeen", self.from_seen),
            ("toSeen", self.to_seen),
        ] {
            if let Some(date) = date {
                url.query_pairs_mut()
                    .append_pair(key, &date.format("%Y-%m-%d").to_string());
            }
        }
        url
    }
}

impl ControlUnitQuery {
    pub fn with_status(mut self, status: ControlUnitStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Restricts to units installed within `[from, to]`; either bound may be open.
    pub fn with_installed_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_installed = from;
        self.to_installed = to;
        self
    }

    /// Restricts to units last seen within `[from, to]`; either bound may be open.
    pub fn with_seen_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_seen = from;
        self.to_seen = to;
        self
    }
}
