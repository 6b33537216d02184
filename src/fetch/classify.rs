//! Soft-error classification
//!
//! The site often answers error conditions with a normal-looking 200 page. The
//! only signal is the wording on the page, so classification is an ordered,
//! first-match table of body fragments.

/// A body fragment and the status it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftError {
    pub fragment: String,
    pub status: u16,
}

/// Ordered soft-error table; the first matching fragment wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftErrorTable {
    entries: Vec<SoftError>,
}

impl Default for SoftErrorTable {
    fn default() -> Self {
        Self::empty()
            .with("You must be logged in", 401)
            .with(
                "This user has voluntarily disabled access to their userpage.",
                403,
            )
            .with(
                "The submission you are trying to find is not in our database.",
                404,
            )
            .with(
                "The journal you are trying to find is not in our database.",
                404,
            )
            .with("This user cannot be found.", 404)
            .with("was not found in our database", 404)
            .with("For more information please check the", 500)
            .with(
                "The server is currently having difficulty responding to all requests.",
                503,
            )
    }
}

impl SoftErrorTable {
    /// A table that never matches
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry after all existing ones
    pub fn push(&mut self, fragment: impl Into<String>, status: u16) {
        self.entries.push(SoftError {
            fragment: fragment.into(),
            status,
        });
    }

    /// Builder form of [`SoftErrorTable::push`]
    pub fn with(mut self, fragment: impl Into<String>, status: u16) -> Self {
        self.push(fragment, status);
        self
    }

    pub fn entries(&self) -> &[SoftError] {
        &self.entries
    }

    /// Status of the first fragment found in `body`
    pub fn lookup(&self, body: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|entry| body.contains(entry.fragment.as_str()))
            .map(|entry| entry.status)
    }
}

/// Maps a transport response to a logical status code
///
/// A non-200 status passes through unchanged. A 200 is checked against the
/// soft-error table and stays 200 if nothing matches.
pub fn classify(status: u16, body: &str, table: &SoftErrorTable) -> u16 {
    if status != 200 {
        return status;
    }

    table.lookup(body).unwrap_or(200)
}

/// Whether a classified status is worth retrying
pub fn is_transient(status: u16) -> bool {
    status >= 500
}
