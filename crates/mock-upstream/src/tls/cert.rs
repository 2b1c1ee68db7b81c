use rcgen::{generate_simple_self_signed, CertifiedKey};
use rustls::pki_types::{pem::PemObject, CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CertError {
    #[error("Certificate generation failed: {0}")]
    Generate(#[from] rcgen::Error),

    #[error("Certificate I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PEM in {path}: {message}")]
    Pem { path: PathBuf, message: String },

    #[error("No certificate found in {0}")]
    EmptyChain(PathBuf),

    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),
}

/// Where the listener's certificate and private key live on disk.
#[derive(Debug, Clone)]
pub struct CertPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl CertPaths {
    pub fn new(cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
        }
    }

    pub fn exist(&self) -> bool {
        self.cert.is_file() && self.key.is_file()
    }
}

/// Generates a self-signed pair unless both files are already present.
/// Returns `true` when new files were written.
pub fn ensure_self_signed(paths: &CertPaths, subject_alt_names: &[String]) -> Result<bool, CertError> {
    if paths.exist() {
        return Ok(false);
    }

    let CertifiedKey { cert, key_pair } = generate_simple_self_signed(subject_alt_names.to_vec())?;

    write_pem(&paths.cert, cert.pem().as_bytes())?;
    write_pem(&paths.key, key_pair.serialize_pem().as_bytes())?;

    info!(
        "Generated self-signed certificate {} for {:?}",
        paths.cert.display(),
        subject_alt_names
    );
    Ok(true)
}

fn write_pem(path: &Path, contents: &[u8]) -> Result<(), CertError> {
    let io_err = |source| CertError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    fs::write(path, contents).map_err(io_err)
}

pub fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, CertError> {
    let pem_err = |e: rustls::pki_types::pem::Error| CertError::Pem {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    };

    let certs = CertificateDer::pem_file_iter(path)
        .map_err(pem_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(pem_err)?;

    if certs.is_empty() {
        return Err(CertError::EmptyChain(path.to_path_buf()));
    }
    Ok(certs)
}

pub fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, CertError> {
    PrivateKeyDer::from_pem_file(path).map_err(|e| CertError::Pem {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    })
}

/// rustls server config advertising only `h2` over ALPN.
pub fn server_config(paths: &CertPaths) -> Result<Arc<ServerConfig>, CertError> {
    let certs = load_certs(&paths.cert)?;
    let key = load_key(&paths.key)?;

    let mut config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec()];

    Ok(Arc::new(config))
}
