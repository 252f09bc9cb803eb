use web_sys::Window;

/// Which page of the site is loaded. Resolved once at startup and handed to
/// the features that only run on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIdentity {
    Home,
    About,
    Services,
    Other,
}

impl PageIdentity {
    pub fn from_path(path: &str) -> Self {
        if path.contains("about.html") {
            PageIdentity::About
        } else if path.contains("services.html") {
            PageIdentity::Services
        } else if path.ends_with("index.html") || path.ends_with("home.html") || path.ends_with('/') {
            PageIdentity::Home
        } else {
            PageIdentity::Other
        }
    }

    pub fn from_window(window: &Window) -> Self {
        match window.location().pathname() {
            Ok(path) => Self::from_path(&path),
            Err(_) => PageIdentity::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_index_are_home() {
        assert_eq!(PageIdentity::from_path("/"), PageIdentity::Home);
        assert_eq!(PageIdentity::from_path("/index.html"), PageIdentity::Home);
        assert_eq!(PageIdentity::from_path("/site/home.html"), PageIdentity::Home);
        assert_eq!(PageIdentity::from_path("/site/"), PageIdentity::Home);
    }

    #[test]
    fn about_matches_anywhere_in_path() {
        assert_eq!(PageIdentity::from_path("/about.html"), PageIdentity::About);
        assert_eq!(PageIdentity::from_path("/en/about.html"), PageIdentity::About);
    }

    #[test]
    fn services_and_others() {
        assert_eq!(PageIdentity::from_path("/services.html"), PageIdentity::Services);
        assert_eq!(PageIdentity::from_path("/contact.html"), PageIdentity::Other);
        assert_eq!(PageIdentity::from_path(""), PageIdentity::Other);
    }
}
