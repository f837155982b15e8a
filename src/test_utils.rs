//! Recording doubles for the navigation and notice seams, shared by
//! the unit tests.

use crate::navigator::{NavigationTarget, Navigator};
use crate::notices::{Notice, NoticeSink};
use std::sync::Mutex;

/// [`Navigator`] double that records navigations and titles.
pub struct RecordingNavigator {
    current_path: Mutex<String>,
    navigations: Mutex<Vec<NavigationTarget>>,
    titles: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(current_path: &str) -> Self {
        Self {
            current_path: Mutex::new(current_path.to_string()),
            navigations: Mutex::new(Vec::new()),
            titles: Mutex::new(Vec::new()),
        }
    }

    pub fn set_current_path(&self, path: &str) {
        *self.current_path.lock().unwrap() = path.to_string();
    }

    pub fn navigations(&self) -> Vec<NavigationTarget> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        self.navigations.lock().unwrap().push(target);
    }

    fn current_path(&self) -> String {
        self.current_path.lock().unwrap().clone()
    }

    fn set_title(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }
}

/// [`NoticeSink`] double that records every surfaced notice.
#[derive(Default)]
pub struct RecordingNotices {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl NoticeSink for RecordingNotices {
    fn notice(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
