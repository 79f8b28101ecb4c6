use camino::{Utf8Path, Utf8PathBuf};

macro_rules! define_paths {
    ($name:ident { $($field:ident : $default:expr),* $(,)? }) => {
        #[derive(Clone, Debug)]
        pub struct $name {
            $(pub $field: Utf8PathBuf,)*
        }

        impl $name {
            pub fn to_absolute(mut self, base: &Utf8Path) -> Self {
                $(self.$field = base.join(self.$field);)*
                self
            }

            pub fn new(base: &Utf8Path) -> Self {
                Self::default().to_absolute(base)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default.into(),)*
                }
            }
        }
    };
}

define_paths!(AppPaths {
    mods: "mods",
    natives: "natives",
    staging: "tmp",
    store: "mods.toml",
});

impl AppPaths {
    /// Staging extraction directory for one archive, keyed by base name.
    pub fn staging_dir(&self, base_name: &str) -> Utf8PathBuf {
        self.staging.join(base_name)
    }
}
