use crate::mediatag_core::media::MediaKind;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// A running preview viewer. Dropping the handle terminates the viewer, so
/// every exit path of the import flow tears it down.
pub struct PreviewHandle {
    child: Child,
}

impl PreviewHandle {
    pub fn terminate(&mut self) {
        if let Err(e) = self.child.kill() {
            log::debug!("Preview process already exited: {}", e);
        }
        let _ = self.child.wait();
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Launch an external viewer for the given media. Returns `None` when the
/// viewer cannot be started; a missing viewer never blocks an import.
pub fn spawn(kind: MediaKind, path: &Path) -> Option<PreviewHandle> {
    let mut command = match kind {
        MediaKind::Image | MediaKind::Gif => {
            let mut c = Command::new("nsxiv");
            c.args(["-q", "-a"]);
            c
        }
        MediaKind::Video => {
            let mut c = Command::new("mpv");
            c.args(["--really-quiet", "--loop=yes"]);
            c
        }
    };

    match command
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => Some(PreviewHandle { child }),
        Err(e) => {
            log::warn!("Failed to launch previewer for {}: {}", path.display(), e);
            None
        }
    }
}
