use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

const STREAM_NAME: &str = "<stream>";

/// Either a path to open or an already-open stream.
///
/// Resolved once at an entry point with [`Endpoint::open_read`] or
/// [`Endpoint::open_write`]; a handle opened from a path is owned by the
/// returned [`Handle`] and closed when it drops.
#[derive(Debug)]
pub enum Endpoint<T> {
    Path(PathBuf),
    Stream(T),
}

impl Endpoint<File> {
    pub fn path(path: impl AsRef<Path>) -> Self {
        Endpoint::Path(path.as_ref().to_path_buf())
    }
}

impl<T> Endpoint<T> {
    pub fn stream(stream: T) -> Self {
        Endpoint::Stream(stream)
    }

    pub fn name(&self) -> String {
        match self {
            Endpoint::Path(path) => path.display().to_string(),
            Endpoint::Stream(_) => STREAM_NAME.to_string(),
        }
    }

    pub fn open_read(self) -> io::Result<Handle<T>> {
        match self {
            Endpoint::Path(path) => {
                let file = File::open(&path)?;
                if is_gzip_path(&path) {
                    let decoder = MultiGzDecoder::new(BufReader::new(file));
                    Ok(Handle::Gzip { path, decoder })
                } else {
                    Ok(Handle::File { path, file })
                }
            }
            Endpoint::Stream(stream) => Ok(Handle::Stream(stream)),
        }
    }

    pub fn open_write(self) -> io::Result<Handle<T>> {
        match self {
            Endpoint::Path(path) => {
                let file = File::create(&path)?;
                Ok(Handle::File { path, file })
            }
            Endpoint::Stream(stream) => Ok(Handle::Stream(stream)),
        }
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

pub enum Handle<T> {
    File {
        path: PathBuf,
        file: File,
    },
    Gzip {
        path: PathBuf,
        decoder: MultiGzDecoder<BufReader<File>>,
    },
    Stream(T),
}

impl<T> Handle<T> {
    pub fn name(&self) -> String {
        match self {
            Handle::File { path, .. } | Handle::Gzip { path, .. } => path.display().to_string(),
            Handle::Stream(_) => STREAM_NAME.to_string(),
        }
    }
}

impl<T: Read> Read for Handle<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Handle::File { file, .. } => file.read(buf),
            Handle::Gzip { decoder, .. } => decoder.read(buf),
            Handle::Stream(stream) => stream.read(buf),
        }
    }
}

impl<T: Write> Write for Handle<T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Handle::File { file, .. } => file.write(buf),
            Handle::Gzip { .. } => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "gzip handles are read-only",
            )),
            Handle::Stream(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Handle::File { file, .. } => file.flush(),
            Handle::Gzip { .. } => Ok(()),
            Handle::Stream(stream) => stream.flush(),
        }
    }
}

impl<T: Seek> Seek for Handle<T> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Handle::File { file, .. } => file.seek(pos),
            Handle::Gzip { path, decoder } => {
                if pos != SeekFrom::Start(0) {
                    return Err(io::Error::new(
                        io::ErrorKind::Unsupported,
                        "gzip handles can only be rewound to the start",
                    ));
                }
                let file = File::open(&*path)?;
                *decoder = MultiGzDecoder::new(BufReader::new(file));
                Ok(0)
            }
            Handle::Stream(stream) => stream.seek(pos),
        }
    }
}
