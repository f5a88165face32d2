pub mod api_client;
pub mod navigation_guard;
pub mod request_interceptor;
pub mod router;
pub mod session_probe;

pub use api_client::{ApiClient, ApiError, Method, RequestAugmenter, RequestConfig};
pub use navigation_guard::{AuthGuard, Decision, NavigationPolicy};
pub use request_interceptor::AuthHeaderInjector;
pub use router::{
    BrowserHistory, HistoryBackend, MemoryHistory, NavigationMode, NavigationOutcome, Router,
    RouterError, RouteTable,
};
pub use session_probe::SessionProbe;
