use crate::{
    errors::{FileOperation, IoError},
    transactions::{Active, RollbackOperation, Transaction},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum StackError {
    #[error("invalid stack '{name}'")]
    #[diagnostic(
        code(guardgen::stack::unknown),
        help("Supported stacks are [blade], [react], [vue], and [api].")
    )]
    Unknown { name: String },

    #[error("no hydrated stub tree for the {stack} stack at '{}'", .path.display())]
    #[diagnostic(
        code(guardgen::stack::missing_stubs),
        help("Hydrate a stub root that contains a directory for this stack first.")
    )]
    MissingStubTree { stack: Stack, path: PathBuf },

    #[error("I/O error during stack installation")]
    #[diagnostic(code(guardgen::stack::io))]
    Io(#[from] IoError),

    #[error("unable to prompt for a stack")]
    #[diagnostic(
        code(guardgen::stack::prompt),
        help("Pass --stack <blade|react|vue|api> when running non-interactively.")
    )]
    Prompt {
        #[source]
        source: inquire::InquireError,
    },

    #[error("unable to strip prefix from directory")]
    #[diagnostic(code(guardgen::stack::strip_prefix))]
    StripPrefix {
        path: PathBuf,
        dir: PathBuf,
        source: std::path::StripPrefixError,
    },
}

/// The supported development stacks. A closed set: adding one means adding
/// a variant and satisfying the exhaustive matches below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stack {
    Blade,
    React,
    Vue,
    Api,
}

impl Stack {
    pub const ALL: [Stack; 4] = [Stack::Blade, Stack::React, Stack::Vue, Stack::Api];

    pub fn name(self) -> &'static str {
        match self {
            Stack::Blade => "blade",
            Stack::React => "react",
            Stack::Vue => "vue",
            Stack::Api => "api",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, StackError> {
        match name {
            "blade" => Ok(Stack::Blade),
            "react" => Ok(Stack::React),
            "vue" => Ok(Stack::Vue),
            "api" => Ok(Stack::Api),
            _ => Err(StackError::Unknown {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-install switches from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Keep Tailwind dark-mode classes in installed views.
    pub dark: bool,
    /// Install the Pest test flavor instead of the stock tests.
    pub pest: bool,
}

const TESTS_DIR: &str = "tests";
const PEST_TESTS_DIR: &str = "pest-tests";

lazy_static::lazy_static! {
    static ref DARK_CLASS_REGEX: regex::Regex =
        regex::Regex::new(r#"\sdark:[^\s"']+"#).expect("a valid regex pattern");
}

/// File name suffixes the dark-class stripper runs over.
const VIEW_EXTENSIONS: &[&str] = &["blade.php", "jsx", "vue", "css"];

/// Asks the user which stack to install.
pub fn prompt_stack() -> Result<Stack, StackError> {
    inquire::Select::new("What is your stack?", Stack::ALL.to_vec())
        .prompt()
        .map_err(|source| StackError::Prompt { source })
}

/// Copies the hydrated subtree for `stack` into `app_root`.
///
/// Precondition: `hydrated_root` is a fully hydrated `.stubs` tree. Writes
/// are tracked in a [`Transaction`]; on error everything this call created
/// is removed again.
pub fn install(
    stack: Stack,
    hydrated_root: &Path,
    app_root: &Path,
    options: &InstallOptions,
) -> Result<(), StackError> {
    let stack_root = hydrated_root.join(stack.name());

    if !stack_root.is_dir() {
        return Err(StackError::MissingStubTree {
            stack,
            path: stack_root,
        });
    }

    let has_pest_flavor = stack_root.join(PEST_TESTS_DIR).is_dir();
    if options.pest && !has_pest_flavor {
        log::warn!(
            "no pest test flavor shipped for the {} stack; installing the stock tests",
            stack
        );
    }
    let use_pest = options.pest && has_pest_flavor;

    let mut trx = Transaction::<Active>::new();
    let mut installed: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(&stack_root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(error) => {
                let path = entry_error_path(&error);

                Err(IoError::new(FileOperation::Read, path, error.into()))?
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let full_path = entry.path();
        let relative = match full_path.strip_prefix(&stack_root) {
            Ok(r) => r,
            Err(error) => Err(StackError::StripPrefix {
                path: full_path.to_path_buf(),
                dir: stack_root.clone(),
                source: error,
            })?,
        };

        let Some(relative) = remap_test_flavor(relative, use_pest) else {
            continue;
        };

        let destination = app_root.join(&relative);

        if let Some(parent) = destination.parent() {
            create_directory(&mut trx, parent)?;
        }

        let content = fs::read(full_path)
            .map_err(|error| IoError::new(FileOperation::Read, full_path.to_path_buf(), error))?;

        write_file(&mut trx, &destination, &content)?;

        installed.push(destination);
    }

    if !options.dark {
        remove_dark_classes(&installed)?;
    }

    trx.commit();

    Ok(())
}

fn entry_error_path(error: &walkdir::Error) -> PathBuf {
    error
        .path()
        .unwrap_or_else(|| Path::new(""))
        .to_path_buf()
}

/// Routes test stubs to the selected flavor: with pest, `pest-tests/` lands
/// under `tests/` and the stock `tests/` subtree is skipped; without it,
/// `pest-tests/` is skipped. `None` means the file is not installed.
fn remap_test_flavor(relative: &Path, use_pest: bool) -> Option<PathBuf> {
    let mut components = relative.components();
    let first = components.next()?.as_os_str().to_string_lossy().into_owned();
    let rest: PathBuf = components.collect();

    match (first.as_str(), use_pest) {
        (PEST_TESTS_DIR, true) => Some(Path::new(TESTS_DIR).join(rest)),
        (PEST_TESTS_DIR, false) => None,
        (TESTS_DIR, true) => None,
        _ => Some(relative.to_path_buf()),
    }
}

/// Creates all directories in `path` if they do not exist, registering a
/// rollback only for the topmost directory this call actually creates, so a
/// rollback never removes pre-existing application directories.
fn create_directory(trx: &mut Transaction<Active>, path: &Path) -> Result<(), StackError> {
    if path.exists() {
        return Ok(());
    }

    let mut created_root = path.to_path_buf();
    while let Some(parent) = created_root.parent() {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        created_root = parent.to_path_buf();
    }

    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    trx.add_operation(RollbackOperation::RemoveDir(created_root));

    Ok(())
}

fn write_file(
    trx: &mut Transaction<Active>,
    path: &Path,
    contents: &[u8],
) -> Result<(), StackError> {
    fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))?;

    let msg = format!("{} {}", "create".green(), path.display());

    println!("{}", &msg);

    trx.add_operation(RollbackOperation::RemoveFile(path.to_path_buf()));

    Ok(())
}

fn is_view_file(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };

    VIEW_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}

/// Removes Tailwind dark-mode classes from the installed view files.
fn remove_dark_classes(files: &[PathBuf]) -> Result<(), StackError> {
    for path in files.iter().filter(|p| is_view_file(p)) {
        let contents = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.clone(), error))?;

        let stripped = DARK_CLASS_REGEX.replace_all(&contents, "");

        if stripped != contents {
            log::debug!("stripping dark classes from {}", path.display());

            fs::write(path, stripped.as_bytes())
                .map_err(|error| IoError::new(FileOperation::Write, path.clone(), error))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_hydrated(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_from_name_accepts_the_four_stacks() {
        assert_eq!(Stack::from_name("blade").unwrap(), Stack::Blade);
        assert_eq!(Stack::from_name("react").unwrap(), Stack::React);
        assert_eq!(Stack::from_name("vue").unwrap(), Stack::Vue);
        assert_eq!(Stack::from_name("api").unwrap(), Stack::Api);
    }

    #[test]
    fn test_from_name_rejects_unknown_stack() {
        let error = Stack::from_name("spa").unwrap_err();

        assert!(matches!(error, StackError::Unknown { ref name } if name == "spa"));
    }

    #[test]
    fn test_remap_test_flavor() {
        let stock = Path::new("tests/Feature/AuthTest.php");
        let pest = Path::new("pest-tests/Feature/AuthTest.php");
        let other = Path::new("routes/admin.php");

        assert_eq!(remap_test_flavor(stock, false), Some(stock.to_path_buf()));
        assert_eq!(remap_test_flavor(pest, false), None);
        assert_eq!(remap_test_flavor(stock, true), None);
        assert_eq!(
            remap_test_flavor(pest, true),
            Some(stock.to_path_buf())
        );
        assert_eq!(remap_test_flavor(other, true), Some(other.to_path_buf()));
    }

    #[test]
    fn test_install_copies_stack_subtree() {
        let dir = tempfile::tempdir().unwrap();
        let hydrated = dir.path().join(".stubs");
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        write_hydrated(&hydrated, "api/routes/admin.php", "Route::prefix('admin');");
        write_hydrated(&hydrated, "blade/routes/admin.php", "blade only");

        install(Stack::Api, &hydrated, &app, &InstallOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(app.join("routes/admin.php")).unwrap(),
            "Route::prefix('admin');"
        );
    }

    #[test]
    fn test_install_fails_without_hydrated_subtree() {
        let dir = tempfile::tempdir().unwrap();
        let hydrated = dir.path().join(".stubs");
        fs::create_dir_all(&hydrated).unwrap();

        let error = install(
            Stack::Vue,
            &hydrated,
            dir.path(),
            &InstallOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            StackError::MissingStubTree {
                stack: Stack::Vue,
                ..
            }
        ));
    }

    #[test]
    fn test_install_selects_pest_flavor() {
        let dir = tempfile::tempdir().unwrap();
        let hydrated = dir.path().join(".stubs");
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        write_hydrated(&hydrated, "blade/tests/Feature/AuthTest.php", "phpunit");
        write_hydrated(&hydrated, "blade/pest-tests/Feature/AuthTest.php", "pest");

        let options = InstallOptions {
            pest: true,
            ..Default::default()
        };
        install(Stack::Blade, &hydrated, &app, &options).unwrap();

        assert_eq!(
            fs::read_to_string(app.join("tests/Feature/AuthTest.php")).unwrap(),
            "pest"
        );
    }

    #[test]
    fn test_install_skips_pest_flavor_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let hydrated = dir.path().join(".stubs");
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        write_hydrated(&hydrated, "blade/tests/Feature/AuthTest.php", "phpunit");
        write_hydrated(&hydrated, "blade/pest-tests/Feature/AuthTest.php", "pest");

        install(Stack::Blade, &hydrated, &app, &InstallOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(app.join("tests/Feature/AuthTest.php")).unwrap(),
            "phpunit"
        );
    }

    #[test]
    fn test_install_strips_dark_classes_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let hydrated = dir.path().join(".stubs");
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        write_hydrated(
            &hydrated,
            "blade/resources/views/admin/home.blade.php",
            r#"<body class="bg-white dark:bg-gray-900 text-black dark:text-white">"#,
        );

        install(Stack::Blade, &hydrated, &app, &InstallOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(app.join("resources/views/admin/home.blade.php")).unwrap(),
            r#"<body class="bg-white text-black">"#
        );
    }

    #[test]
    fn test_install_keeps_dark_classes_with_dark_option() {
        let dir = tempfile::tempdir().unwrap();
        let hydrated = dir.path().join(".stubs");
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        let view = r#"<body class="bg-white dark:bg-gray-900">"#;
        write_hydrated(&hydrated, "blade/resources/views/admin/home.blade.php", view);

        let options = InstallOptions {
            dark: true,
            ..Default::default()
        };
        install(Stack::Blade, &hydrated, &app, &options).unwrap();

        assert_eq!(
            fs::read_to_string(app.join("resources/views/admin/home.blade.php")).unwrap(),
            view
        );
    }
}
