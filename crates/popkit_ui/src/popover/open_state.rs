//! Open/closed flag with explicit ownership.

/// Who owns the open flag.
///
/// `Owned` popovers flip their own flag. `External` popovers mirror the value
/// last supplied by the owner and only ever *request* changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Owned(bool),
    External(bool),
}

/// What a state mutation did to the effective open flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    Unchanged,
}

impl Transition {
    fn between(was_open: bool, is_open: bool) -> Self {
        match (was_open, is_open) {
            (false, true) => Transition::Opened,
            (true, false) => Transition::Closed,
            _ => Transition::Unchanged,
        }
    }
}

impl OpenState {
    /// `controlled` wins over `default_open` when both are given.
    pub fn new(controlled: Option<bool>, default_open: bool) -> Self {
        match controlled {
            Some(open) => OpenState::External(open),
            None => OpenState::Owned(default_open),
        }
    }

    pub fn is_open(&self) -> bool {
        match *self {
            OpenState::Owned(open) | OpenState::External(open) => open,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, OpenState::External(_))
    }

    /// Ask for a new value.
    ///
    /// Owned state applies it. External state stays put; the caller is
    /// expected to forward the request to the owner.
    pub fn request(&mut self, open: bool) -> Transition {
        match self {
            OpenState::Owned(current) => {
                let was = *current;
                *current = open;
                Transition::between(was, open)
            }
            OpenState::External(_) => Transition::Unchanged,
        }
    }

    /// Apply the owner's authoritative value. Ignored for owned state.
    pub fn sync(&mut self, open: bool) -> Transition {
        match self {
            OpenState::External(current) => {
                let was = *current;
                *current = open;
                Transition::between(was, open)
            }
            OpenState::Owned(_) => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_request_applies() {
        let mut state = OpenState::new(None, false);
        assert_eq!(state.request(true), Transition::Opened);
        assert!(state.is_open());
        assert_eq!(state.request(true), Transition::Unchanged);
        assert_eq!(state.request(false), Transition::Closed);
    }

    #[test]
    fn test_external_request_is_inert() {
        let mut state = OpenState::new(Some(false), true);
        assert!(state.is_controlled());
        assert!(!state.is_open(), "controlled value wins over default_open");
        assert_eq!(state.request(true), Transition::Unchanged);
        assert!(!state.is_open());
    }

    #[test]
    fn test_sync_only_affects_external() {
        let mut owned = OpenState::new(None, false);
        assert_eq!(owned.sync(true), Transition::Unchanged);
        assert!(!owned.is_open());

        let mut external = OpenState::new(Some(false), false);
        assert_eq!(external.sync(true), Transition::Opened);
        assert!(external.is_open());
        assert_eq!(external.sync(false), Transition::Closed);
    }

    #[test]
    fn test_default_open() {
        assert!(OpenState::new(None, true).is_open());
    }
}
