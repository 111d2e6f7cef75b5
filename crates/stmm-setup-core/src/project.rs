//! The sub-projects of the source package and what they install.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Directory below a schemas prefix that holds compiled gsettings schemas.
pub const SCHEMAS_SUBDIR: &str = "share/glib-2.0/schemas";

/// Name of the out-of-source build folder inside each sub-project.
pub const BUILD_DIR_NAME: &str = "build";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Library,
    Application,
}

/// A CMake sub-project of the source package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubProject {
    /// Gtk Bluetooth input backend library
    GtkBt,
    /// Bluetooth keyboard application, links `GtkBt`
    Btkb,
}

/// Sub-projects in the order they must be installed.
pub const DEPENDENCY_ORDER: [SubProject; 2] = [SubProject::GtkBt, SubProject::Btkb];

/// Something an install leaves on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// File or directory below the install prefix
    Installed(&'static str),
    /// Entries of `dir` (below the install prefix) whose name starts with `prefix`
    InstalledMatching {
        dir: &'static str,
        prefix: &'static str,
    },
    /// File below the schemas prefix
    Schema(&'static str),
}

const GTK_BT_ARTIFACTS: &[Artifact] = &[
    Artifact::Installed("include/stmm-input-gtk-bt"),
    Artifact::InstalledMatching {
        dir: "lib",
        prefix: "libstmm-input-gtk-bt.so",
    },
    Artifact::Installed("lib/libstmm-input-gtk-bt.a"),
    Artifact::Installed("lib/pkgconfig/stmm-input-gtk-bt.pc"),
    Artifact::Installed("share/doc/libstmm-input-gtk-bt"),
];

const BTKB_ARTIFACTS: &[Artifact] = &[
    Artifact::Installed("bin/stmm-input-btkb"),
    Artifact::Installed("share/stmm-input-btkb"),
    Artifact::Installed("share/icons/hicolor/24x24/apps/stmm-input-btkb.png"),
    Artifact::Installed("share/icons/hicolor/32x32/apps/stmm-input-btkb.png"),
    Artifact::Installed("share/icons/hicolor/48x48/apps/stmm-input-btkb.png"),
    Artifact::Installed("share/icons/hicolor/scalable/apps/stmm-input-btkb.svg"),
    Artifact::Installed("share/applications/com.efanomars.stmm-input-btkb.desktop"),
    Artifact::Installed("share/man/man1/stmm-input-btkb.1.gz"),
    Artifact::Schema("share/glib-2.0/schemas/com.efanomars.stmm-input-btkb.gschema.xml"),
];

impl SubProject {
    pub fn name(self) -> &'static str {
        match self {
            SubProject::GtkBt => "libstmm-input-gtk-bt",
            SubProject::Btkb => "stmm-input-btkb",
        }
    }

    pub fn kind(self) -> ProjectKind {
        match self {
            SubProject::GtkBt => ProjectKind::Library,
            SubProject::Btkb => ProjectKind::Application,
        }
    }

    /// Subcommand that installs only this sub-project.
    pub fn install_subcommand(self) -> &'static str {
        match self {
            SubProject::GtkBt => "install-lib",
            SubProject::Btkb => "install-btkb",
        }
    }

    /// Subcommand that uninstalls only this sub-project.
    pub fn uninstall_subcommand(self) -> &'static str {
        match self {
            SubProject::GtkBt => "uninstall-lib",
            SubProject::Btkb => "uninstall-btkb",
        }
    }

    /// Sub-project directory inside the source package.
    pub fn dir(self, source_dir: &Path) -> PathBuf {
        source_dir.join(self.name())
    }

    pub fn build_dir(self, source_dir: &Path) -> PathBuf {
        self.dir(source_dir).join(BUILD_DIR_NAME)
    }

    /// Installed files and folders, in removal order.
    pub fn artifacts(self) -> &'static [Artifact] {
        match self {
            SubProject::GtkBt => GTK_BT_ARTIFACTS,
            SubProject::Btkb => BTKB_ARTIFACTS,
        }
    }

    /// Whether the install ships a gsettings schema.
    pub fn has_schemas(self) -> bool {
        self.artifacts()
            .iter()
            .any(|a| matches!(a, Artifact::Schema(_)))
    }
}

impl fmt::Display for SubProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_comes_first() {
        assert_eq!(DEPENDENCY_ORDER[0].kind(), ProjectKind::Library);
        assert_eq!(DEPENDENCY_ORDER[1].kind(), ProjectKind::Application);
    }

    #[test]
    fn test_paths_follow_source_dir() {
        let src = Path::new("/src/stmm-input-bt");
        assert_eq!(
            SubProject::Btkb.build_dir(src),
            PathBuf::from("/src/stmm-input-bt/stmm-input-btkb/build")
        );
        assert_eq!(
            SubProject::GtkBt.dir(src),
            PathBuf::from("/src/stmm-input-bt/libstmm-input-gtk-bt")
        );
    }

    #[test]
    fn test_only_application_has_schemas() {
        assert!(SubProject::Btkb.has_schemas());
        assert!(!SubProject::GtkBt.has_schemas());
    }

    #[test]
    fn test_schema_is_last_application_artifact() {
        let last = SubProject::Btkb.artifacts().last().copied();
        assert!(matches!(last, Some(Artifact::Schema(_))));
    }
}
