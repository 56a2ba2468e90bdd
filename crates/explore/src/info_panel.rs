use catalog::{CountryCatalog, CountryRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub icon: &'static str,
    pub label: &'static str,
    pub lines: Vec<String>,
}

/// The detail view the panel writes into (a DOM subtree, a terminal, ...).
pub trait DetailView {
    fn set_title(&mut self, title: &str);
    fn set_description(&mut self, text: &str);
    fn set_details(&mut self, sections: &[DetailSection]);
    fn set_visible(&mut self, visible: bool);
    fn scroll_into_view(&mut self);
}

impl<T: DetailView + ?Sized> DetailView for &mut T {
    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }

    fn set_description(&mut self, text: &str) {
        (**self).set_description(text);
    }

    fn set_details(&mut self, sections: &[DetailSection]) {
        (**self).set_details(sections);
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn scroll_into_view(&mut self) {
        (**self).scroll_into_view();
    }
}

/// Presents one country at a time.
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    shown: Option<String>,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the country currently displayed.
    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    /// Displays `key`. An unknown key (e.g. stale after a reload) leaves the
    /// view untouched and returns `false`.
    pub fn show(
        &mut self,
        catalog: &CountryCatalog,
        key: &str,
        view: &mut impl DetailView,
    ) -> bool {
        let Some(record) = catalog.get(key) else {
            return false;
        };

        view.set_title(&record.display_name);
        view.set_description(&record.description);
        view.set_details(&details_for(record));
        view.set_visible(true);
        view.scroll_into_view();
        self.shown = Some(record.key.clone());
        true
    }

    pub fn hide(&mut self, view: &mut impl DetailView) {
        view.set_visible(false);
        self.clear();
    }

    /// Forgets the shown country without touching any view.
    pub fn clear(&mut self) {
        self.shown = None;
    }
}

pub fn details_for(record: &CountryRecord) -> Vec<DetailSection> {
    vec![
        DetailSection {
            icon: "🎭",
            label: "Culture",
            lines: vec![record.culture.clone()],
        },
        DetailSection {
            icon: "🏛️",
            label: "Monuments",
            lines: record.monuments.clone(),
        },
        DetailSection {
            icon: "👥",
            label: "Population",
            lines: vec![record.population.clone()],
        },
        DetailSection {
            icon: "🗣️",
            label: "Langues",
            lines: vec![record.languages.clone()],
        },
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{DetailSection, DetailView, InfoPanel};
    use catalog::fallback_catalog;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default, Clone, PartialEq)]
    pub(crate) struct FakeView {
        pub title: String,
        pub description: String,
        pub sections: Vec<DetailSection>,
        pub visible: bool,
        pub scrolls: usize,
    }

    impl DetailView for FakeView {
        fn set_title(&mut self, title: &str) {
            self.title = title.to_string();
        }

        fn set_description(&mut self, text: &str) {
            self.description = text.to_string();
        }

        fn set_details(&mut self, sections: &[DetailSection]) {
            self.sections = sections.to_vec();
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn scroll_into_view(&mut self) {
            self.scrolls += 1;
        }
    }

    #[test]
    fn show_renders_record_and_reveals() {
        let catalog = fallback_catalog();
        let mut panel = InfoPanel::new();
        let mut view = FakeView::default();

        assert!(panel.show(&catalog, "France", &mut view));
        assert_eq!(view.title, "\u{1F1EB}\u{1F1F7} France");
        assert!(view.description.starts_with("Pays de la gastronomie"));
        assert_eq!(view.sections.len(), 4);
        assert_eq!(
            view.sections[1].lines,
            vec!["Tour Eiffel", "Louvre", "Versailles"]
        );
        assert_eq!(view.sections[3].lines, vec!["Français"]);
        assert!(view.visible);
        assert_eq!(view.scrolls, 1);
        assert_eq!(panel.shown(), Some("France"));
    }

    #[test]
    fn unknown_key_leaves_previous_content() {
        let catalog = fallback_catalog();
        let mut panel = InfoPanel::new();
        let mut view = FakeView::default();
        panel.show(&catalog, "France", &mut view);
        let before = view.clone();

        assert!(!panel.show(&catalog, "Atlantis", &mut view));
        assert_eq!(view, before);
        assert_eq!(panel.shown(), Some("France"));
    }

    #[test]
    fn hide_clears_visibility() {
        let catalog = fallback_catalog();
        let mut panel = InfoPanel::new();
        let mut view = FakeView::default();
        panel.show(&catalog, "France", &mut view);
        panel.hide(&mut view);
        assert!(!view.visible);
        assert_eq!(panel.shown(), None);
    }
}
