//! Detail view support
//!
//! Fetches one record by id and lays it out as labeled sections that every
//! front end renders the same way.

use crate::fetch::Loader;
use crate::record::Record;
use crate::source::RecordSource;
use std::sync::Arc;
use std::time::Duration;

/// Single-record fetch with the same stale-response guard as the list
pub struct DetailController {
    source: Arc<dyn RecordSource>,
    loader: Loader<Record>,
    id: Option<u64>,
    record: Option<Record>,
    last_error: Option<String>,
}

impl DetailController {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            loader: Loader::new(),
            id: None,
            record: None,
            last_error: None,
        }
    }

    /// Fetch `id`, superseding any request still in flight
    pub fn load(&mut self, id: u64) {
        if self.id == Some(id) && (self.record.is_some() || self.loader.is_loading()) {
            return;
        }
        self.loader.invalidate();
        self.id = Some(id);
        self.record = None;
        self.last_error = None;

        let source = Arc::clone(&self.source);
        self.loader.start(move || source.fetch_one(id));
    }

    pub fn poll(&mut self) -> bool {
        match self.loader.poll() {
            Some(result) => {
                self.apply(result);
                true
            }
            None => false,
        }
    }

    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.loader.wait(timeout) {
            Some(result) => {
                self.apply(result);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, result: crate::Result<Record>) {
        match result {
            Ok(record) => self.record = Some(record),
            Err(e) => {
                log::error!("error fetching user {:?}: {}", self.id, e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Leave the detail view; a late answer for it is ignored
    pub fn unmount(&mut self) {
        self.loader.invalidate();
        self.id = None;
        self.record = None;
        self.last_error = None;
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// One label/value line of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub fields: Vec<Field>,
}

fn field(label: &'static str, value: impl Into<String>) -> Field {
    Field {
        label,
        value: value.into(),
    }
}

/// Personal Information, Address and Company, in display order
pub fn sections(record: &Record) -> Vec<Section> {
    let address = &record.address;
    let company = &record.company;

    vec![
        Section {
            title: "Personal Information",
            fields: vec![
                field("Name", record.display_name.as_str()),
                field("Username", record.handle_label()),
                field("Email", record.email.as_str()),
                field("Phone", record.phone.as_str()),
                field("Website", record.website.as_str()),
            ],
        },
        Section {
            title: "Address",
            fields: vec![
                field("Street", address.street.as_str()),
                field("Suite", address.suite.as_str()),
                field("City", address.city.as_str()),
                field("Zipcode", address.zipcode.as_str()),
                field(
                    "Geo Location",
                    format!("{}, {}", address.geo.lat, address.geo.lng),
                ),
            ],
        },
        Section {
            title: "Company",
            fields: vec![
                field("Company Name", company.name.as_str()),
                field("Catch Phrase", company.catch_phrase.as_str()),
                field("Business", company.bs.as_str()),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DirectoryError, Result};

    const WAIT: Duration = Duration::from_secs(5);

    struct OneSource;

    impl RecordSource for OneSource {
        fn fetch_all(&self) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }

        fn fetch_one(&self, id: u64) -> Result<Record> {
            if id == 404 {
                return Err(DirectoryError::from_status(404, "http://test/users/404"));
            }
            Ok(Record::new(id, format!("User {}", id), "u@example.com"))
        }
    }

    #[test]
    fn loads_single_record() {
        let mut detail = DetailController::new(Arc::new(OneSource));
        detail.load(3);
        assert!(detail.is_loading());
        assert!(detail.wait(WAIT));
        assert!(!detail.is_loading());
        assert_eq!(detail.record().map(|r| r.id), Some(3));
    }

    #[test]
    fn failure_clears_loading() {
        let mut detail = DetailController::new(Arc::new(OneSource));
        detail.load(404);
        assert!(detail.wait(WAIT));
        assert!(!detail.is_loading());
        assert!(detail.record().is_none());
        assert!(detail.last_error().is_some());
    }

    #[test]
    fn newer_id_wins() {
        let mut detail = DetailController::new(Arc::new(OneSource));
        detail.load(1);
        detail.load(2);
        assert!(detail.wait(WAIT));
        assert_eq!(detail.record().map(|r| r.id), Some(2));
    }

    #[test]
    fn sections_layout() {
        let mut record = Record::new(1, "Leanne Graham", "Sincere@april.biz");
        record.handle = "Bret".into();
        record.address.geo.lat = "-37.3159".into();
        record.address.geo.lng = "81.1496".into();

        let sections = sections(&record);
        let titles: Vec<_> = sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, ["Personal Information", "Address", "Company"]);
        assert_eq!(sections[0].fields[1].value, "@Bret");
        assert_eq!(sections[1].fields[4].value, "-37.3159, 81.1496");
        assert_eq!(sections[2].fields.len(), 3);
    }
}
