use std::{
    fs::{self, File},
    path::Path,
};

/// Read-only open options for backing sources.
#[derive(Debug)]
pub(crate) struct Options {
    inner: fs::OpenOptions,
    lock: bool,
}

pub(crate) struct Fs;

pub(crate) trait Open {
    fn open(self, path: impl AsRef<Path>) -> std::io::Result<File>;
}

macro_rules! generate_methods {
    ($($name:ident: $field:ident),+) => {
        $(
            pub fn $name(mut self, $field: bool) -> Self {
                self.$field = $field;
                self
            }
        )+
    };
}

impl Options {
    generate_methods! {
        lock: lock
    }
}

impl Default for Options {
    fn default() -> Self {
        let mut inner = File::options();
        inner.read(true);

        Self { inner, lock: false }
    }
}

impl Fs {
    pub fn options() -> Options {
        Options::default()
    }
}

#[cfg(unix)]
mod unix {
    use std::{fs::File, os::fd::AsRawFd};

    use super::{Open, Options};

    impl Open for Options {
        fn open(self, path: impl AsRef<std::path::Path>) -> std::io::Result<File> {
            let file = self.inner.open(&path)?;

            // shared lock: other readers are fine, a writer holding LOCK_EX is not
            if self.lock {
                let lock = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_SH | libc::LOCK_NB) };

                if lock.ne(&0) {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::WouldBlock,
                        format!("Couldn't lock file: {}", path.as_ref().display()),
                    ));
                }
            }

            Ok(file)
        }
    }
}

#[cfg(not(unix))]
mod other {
    use std::fs::File;

    use super::{Open, Options};

    impl Open for Options {
        fn open(self, path: impl AsRef<std::path::Path>) -> std::io::Result<File> {
            self.inner.open(path)
        }
    }
}
