use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's parsed `Cargo.toml`, used to find how a tessel crate is
/// reachable from the crate invoking a derive.
///
/// # Example
///
/// ```rust
/// # use ts_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("ts_schema"));
/// ```
///
/// Reading and parsing the manifest is not free, so a macro should resolve
/// each path once per invocation.
///
/// # Resolution rules
///
/// 1. A crate listed under `dependencies` resolves to `::crate_name`.
/// 2. A `ts_` crate resolves to `::tessel::short_name` when the caller depends
///    on the facade crate `tessel` (`ts_schema` becomes `::tessel::schema`).
/// 3. Same as 2 for the alias `ts`.
/// 4. Steps 1 to 3 are repeated for `dev-dependencies`.
/// 5. Anything else falls back to `::crate_name`.
///
/// A crate that uses its own derive should declare `extern crate self as name;`
/// so the fallback path also works from inside the crate.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "tessel";
const SHORT_NAME: &str = "ts";
const CRATE_PREFIX: &str = "ts_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn crate_path(name: &str) -> syn::Path {
        syn::parse_str(&format!("::{name}"))
            .unwrap_or_else(|_| panic!("`{name}` is not a valid crate name"))
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::crate_path(name));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        [FACADE_NAME, SHORT_NAME]
            .into_iter()
            .find(|facade| deps.contains_key(facade))
            .map(|facade| {
                let mut path = Self::crate_path(facade);
                let segment: syn::PathSegment = syn::parse_str(module)
                    .unwrap_or_else(|_| panic!("`{module}` is not a valid path segment"));
                path.segments.push(segment);
                path
            })
    }

    /// Returns the [`syn::Path`] through which the caller reaches `name`.
    ///
    /// See the type-level documentation for the lookup order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::crate_path(name))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Manifests are cached per path and re-read when the file's modification
    /// time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn resolve(source: &str, name: &str) -> String {
        let document = Document::parse(source.to_owned().into_boxed_str()).unwrap();
        let manifest = Manifest {
            manifest: document,
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        };
        let path = manifest.get_crate_path(name);
        path.segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency_wins() {
        let source = "[dependencies]\nts_schema = \"0.1\"\ntessel = \"0.1\"\n";
        assert_eq!(resolve(source, "ts_schema"), "ts_schema");
    }

    #[test]
    fn facade_dependency_maps_short_name() {
        let source = "[dependencies]\ntessel = \"0.1\"\n";
        assert_eq!(resolve(source, "ts_schema"), "tessel::schema");

        let source = "[dev-dependencies]\nts = { package = \"tessel\", version = \"0.1\" }\n";
        assert_eq!(resolve(source, "ts_text"), "ts::text");
    }

    #[test]
    fn unknown_falls_back_to_absolute() {
        let source = "[package]\nname = \"demo\"\n";
        assert_eq!(resolve(source, "ts_schema"), "ts_schema");
    }
}
