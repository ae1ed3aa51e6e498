use std::io;
use std::sync::{Arc, Mutex, OnceLock};

use nfield_core::ServiceRegistry;
use nfield_infra::{register_sdk_services, NfieldConnection, NfieldConnectionFactory};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Install a global subscriber once per test binary, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Registry holding the default SDK services.
pub fn sdk_registry() -> ServiceRegistry {
    let registry = ServiceRegistry::new();
    register_sdk_services(&registry);
    registry
}

/// Connection to the mock server, backed by [`sdk_registry`].
pub fn connect(server: &MockServer) -> NfieldConnection {
    init_tracing();
    NfieldConnectionFactory::create(Arc::new(sdk_registry()), &format!("{}/", server.uri()))
        .expect("mock server address should be valid")
}

/// Mount a sign-in endpoint that accepts any credentials and issues `token`.
pub async fn mount_sign_in(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/SignIn"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-AuthenticationToken", token))
        .mount(server)
        .await;
}

/// Value of the `Authorization` header a recorded request carried.
pub fn authorization_of(request: &wiremock::Request) -> Option<String> {
    request.headers.get("authorization").and_then(|value| value.to_str().ok()).map(str::to_string)
}

/// Handle for inspecting log output captured during a test.
#[derive(Clone, Default)]
pub struct LogHandle {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogHandle {
    /// Everything logged so far, one event per line.
    pub fn output(&self) -> String {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.output().lines().any(|line| line.contains(needle))
    }
}

impl io::Write for LogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("log mutex poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogHandle {
    type Writer = LogHandle;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture every event emitted on the current thread until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so spans and events of
/// the code under test land here.
pub fn capture_logs() -> (LogHandle, DefaultGuard) {
    let handle = LogHandle::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(handle.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (handle, guard)
}
