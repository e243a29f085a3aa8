/// Settings for the cache.
///
/// Settings can be used to alter which kinds of entities the cache retains.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Settings {
    /// Whether to cache users seen in interactions and member updates.
    ///
    /// Disabling this keeps memory flat on large deployments; resolution
    /// still works, entities just stop being retained per user.
    pub cache_users: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_users: true,
        }
    }
}

impl Settings {
    /// Alias of [`Default::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
