use log::{log, Level};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use task_local_extensions::Extensions;

pub struct LoggingMiddleware {
    level: Level,
}

impl LoggingMiddleware {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        request: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        log!(
            self.level,
            "begin request {} {}",
            request.method(),
            request.url()
        );
        let result = next.run(request, extensions).await;
        match result.as_ref() {
            Ok(response) => {
                // Quota is the scarce resource in bulk runs; keep it visible.
                if let Some(remaining) = response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok())
                {
                    log!(
                        self.level,
                        "received response {} ({remaining} API calls remaining)",
                        response.status()
                    );
                } else {
                    log!(self.level, "received response {}", response.status());
                }
            }
            Err(e) => {
                log!(self.level, "request failed {:?}", e);
            }
        }
        result
    }
}
