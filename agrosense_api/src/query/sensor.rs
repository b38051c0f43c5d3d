use url::Url;

use super::{
    common::{append_flag, append_opt, QueryCommon},
    Query,
};

#[derive(Clone, Debug, Default)]
pub struct SensorQuery {
    pub common: QueryCommon,
    /// Hardware type filter; `None` means every type.
    pub sensor_type: Option<String>,
    /// `None` means active and inactive.
    pub active: Option<bool>,
    pub control_unit_id: Option<i64>,
}

impl Query for SensorQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        append_opt(&mut url, "type", self.sensor_type.as_deref());
        append_flag(&mut url, "active", self.active);
        if let Some(control_unit_id) = self.control_unit_id {
            url.query_pairs_mut()
                .append_pair("control_unit_id", &control_unit_id.to_string());
        }
        url
    }
}

impl SensorQuery {
    pub fn with_type(mut self, sensor_type: &str) -> Self {
        self.sensor_type = Some(sensor_type.to_string());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_control_unit(mut self, control_unit_id: i64) -> Self {
        self.control_unit_id = Some(control_unit_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{Query, SensorQuery};

    #[test]
    fn test_sensor_query() {
        let url = Url::parse("https://example.com/sensors").unwrap();

        insta::assert_snapshot!(
            SensorQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/sensors?page=1&per_page=12"
        );

        insta::assert_snapshot!(
            SensorQuery::default()
                .with_type("dht22")
                .with_active(false)
                .with_control_unit(4)
                .with_per_page(50)
                .add_to_url(&url)
                .to_string(),
            @"https://example.com/sensors?page=1&per_page=50&type=dht22&active=0&control_unit_id=4"
        );
    }
}
