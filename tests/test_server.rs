// Test web server for integration tests

use std::net::SocketAddr;
use tokio::sync::OnceCell;

// Include the test server app inline
include!("test_server_app.rs");

static TEST_SERVER: OnceCell<TestServerHandle> = OnceCell::const_new();

pub struct TestServerHandle {
    pub addr: SocketAddr,
    pub base_url: String,
}

/// Start the test server once for all tests
pub async fn ensure_test_server() -> &'static TestServerHandle {
    TEST_SERVER
        .get_or_init(|| async {
            // Get a free port first
            let std_listener = std::net::TcpListener::bind("127.0.0.1:0")
                .expect("Failed to bind test server");
            let addr = std_listener.local_addr().unwrap();
            let base_url = format!("http://{}", addr);
            // Close the listener so the thread can bind to it
            drop(std_listener);

            // Each test binary uses its own runtime per test, so the server
            // gets a dedicated thread and runtime that outlive them
            let server_handle = std::thread::spawn(move || {
                let runtime = tokio::runtime::Runtime::new()
                    .expect("Failed to create runtime");

                runtime.block_on(async {
                    let listener = tokio::net::TcpListener::bind(addr)
                        .await
                        .expect("Failed to bind in thread");
                    let app = create_app().await;
                    axum::serve(listener, app)
                        .await
                        .expect("Test server failed");
                });
            });

            let client = reqwest::Client::new();
            for i in 0..30 {
                tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

                let ready = client
                    .get(&base_url)
                    .timeout(std::time::Duration::from_secs(1))
                    .send()
                    .await
                    .map(|response| response.status().is_success())
                    .unwrap_or(false);
                if ready {
                    eprintln!("Test server ready at {} after {} attempts", base_url, i + 1);
                    break;
                }

                if i == 29 {
                    panic!("Test server failed to start after 30 attempts - not responding to HTTP requests");
                }
            }

            // The thread is never joined; it dies with the test process
            drop(server_handle);

            TestServerHandle { addr, base_url }
        })
        .await
}
