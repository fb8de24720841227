/// Starting the detached viewer
///
/// The viewer is a second copy of this executable started with `--view`.
/// It shares nothing with the browser; the image path on its command line
/// is all it gets. When it cannot be started the OS default application
/// opens the file instead.
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::error::{BrowseError, BrowseResult};

/// Which route `open_viewer` ended up taking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Viewer,
    SystemOpener,
    Failed,
}

/// Command line that shows `image` in a viewer started from `program`
pub fn viewer_command(program: &Path, image: &Path) -> Command {
    let mut command = Command::new(program);
    command.arg("--view").arg(image).stdin(Stdio::null());
    command
}

/// Start the bundled viewer for `image` without waiting for it
pub fn spawn_viewer(image: &Path) -> BrowseResult<()> {
    let launch_error = |source| BrowseError::Launch {
        path: image.to_path_buf(),
        source,
    };

    let program = std::env::current_exe().map_err(launch_error)?;
    let child = viewer_command(&program, image).spawn().map_err(launch_error)?;
    log::info!("Started viewer (pid {}) for {}", child.id(), image.display());
    reap_in_background(child, image.to_path_buf());
    Ok(())
}

/// Wait for a viewer on its own thread so it does not linger as a zombie
fn reap_in_background(mut child: Child, image: PathBuf) -> JoinHandle<Option<ExitStatus>> {
    thread::spawn(move || match child.wait() {
        Ok(status) => {
            log::debug!("Viewer for {} exited with {}", image.display(), status);
            Some(status)
        }
        Err(err) => {
            log::warn!("Lost track of viewer for {}: {}", image.display(), err);
            None
        }
    })
}

/// Hand `path` (file or folder) to the OS default application
pub fn open_with_system(path: &Path) -> BrowseResult<()> {
    open::that_detached(path).map_err(|source| BrowseError::SystemOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Show `image` in the bundled viewer, or the system one if that fails
pub fn open_viewer(image: &Path) -> Launch {
    open_viewer_with(image, spawn_viewer, open_with_system)
}

fn open_viewer_with(
    image: &Path,
    viewer: impl FnOnce(&Path) -> BrowseResult<()>,
    fallback: impl FnOnce(&Path) -> BrowseResult<()>,
) -> Launch {
    let Err(err) = viewer(image) else {
        return Launch::Viewer;
    };
    log::warn!("{}, falling back to the system viewer", err);

    match fallback(image) {
        Ok(()) => Launch::SystemOpener,
        Err(err) => {
            log::error!("{}", err);
            Launch::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::ffi::OsStr;
    use std::io;

    fn launch_failure(path: &Path) -> BrowseResult<()> {
        Err(BrowseError::Launch {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
        })
    }

    #[test]
    fn viewer_command_passes_view_flag_and_path() {
        let command = viewer_command(Path::new("/usr/bin/image-browser"), Path::new("/photos/a b.jpg"));
        assert_eq!(command.get_program(), OsStr::new("/usr/bin/image-browser"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, vec![OsStr::new("--view"), OsStr::new("/photos/a b.jpg")]);
    }

    #[test]
    fn viewer_success_skips_fallback() {
        let fallback_called = Cell::new(false);
        let launch = open_viewer_with(
            Path::new("cat.png"),
            |_| Ok(()),
            |_| {
                fallback_called.set(true);
                Ok(())
            },
        );
        assert_eq!(launch, Launch::Viewer);
        assert!(!fallback_called.get());
    }

    #[test]
    fn viewer_failure_falls_back_to_system_opener() {
        let opened = Cell::new(None);
        let launch = open_viewer_with(Path::new("cat.png"), launch_failure, |path| {
            opened.set(Some(path.to_path_buf()));
            Ok(())
        });
        assert_eq!(launch, Launch::SystemOpener);
        assert_eq!(opened.take(), Some(Path::new("cat.png").to_path_buf()));
    }

    #[test]
    fn both_routes_failing_is_reported() {
        let launch = open_viewer_with(Path::new("cat.png"), launch_failure, |path| {
            Err(BrowseError::SystemOpen {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "no handler"),
            })
        });
        assert_eq!(launch, Launch::Failed);
    }

    #[cfg(unix)]
    #[test]
    fn finished_viewer_is_reaped() {
        let child = Command::new("true").stdin(Stdio::null()).spawn().unwrap();
        let status = reap_in_background(child, PathBuf::from("cat.png")).join().unwrap();
        assert!(status.is_some_and(|status| status.success()));
    }

    #[test]
    fn spawn_failure_is_a_launch_error() {
        let err = viewer_command(Path::new("/nonexistent/viewer-binary"), Path::new("x.png"))
            .spawn()
            .map_err(|source| BrowseError::Launch {
                path: "x.png".into(),
                source,
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("cannot launch viewer for x.png"));
    }
}
