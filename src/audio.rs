//! Opening the audio output, which is shared by the whole program.

use rodio::{OutputStream, OutputStreamBuilder};

pub mod waiter;

/// Runs `f` with stderr pointed at `/dev/null`, then points it back at the terminal.
///
/// ALSA prints straight to stderr while the device is opened, which would
/// scribble all over the interface.
#[cfg(target_os = "linux")]
fn quietly<T>(f: impl FnOnce() -> T) -> crate::Result<T> {
    use std::ffi::CString;

    extern "C" {
        static stderr: *mut libc::FILE;
    }

    let write = CString::new("w")?;
    let redirect = |path: &str| -> crate::Result<()> {
        let path = CString::new(path)?;

        // SAFETY: both strings outlive the call, and `stderr` is always open.
        unsafe { libc::freopen(path.as_ptr(), write.as_ptr(), stderr) };
        Ok(())
    };

    redirect("/dev/null")?;
    let result = f();
    redirect("/dev/tty")?;

    Ok(result)
}

/// Opens the default output stream.
///
/// Unless `debug` is set, ALSA's complaints are hidden on Linux.
#[cfg_attr(not(target_os = "linux"), allow(unused_variables))]
pub fn stream(debug: bool) -> crate::Result<OutputStream> {
    #[cfg(target_os = "linux")]
    let mut stream = if debug {
        OutputStreamBuilder::open_default_stream()?
    } else {
        quietly(OutputStreamBuilder::open_default_stream)??
    };

    #[cfg(not(target_os = "linux"))]
    let mut stream = OutputStreamBuilder::open_default_stream()?;

    stream.log_on_drop(false);
    Ok(stream)
}
