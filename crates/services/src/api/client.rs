use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use engage_core::model::ToastLevel;

use crate::api::auth::AuthProvider;
use crate::api::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{GENERIC_REQUEST_FAILURE, RequestError};
use crate::notify::Notifier;

/// Whether a failed request is reported to the user by the client itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReport {
    /// Emit one error toast before returning the failure.
    Notify,
    /// Leave reporting to the caller.
    Silent,
}

/// JSON client for the learning backend.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    auth: Arc<dyn AuthProvider>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            transport,
            auth,
            notifier,
        }
    }

    #[must_use]
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// Show a message through the client's notification channel.
    pub fn notify(&self, level: ToastLevel, message: &str) {
        self.notifier.notify(level, message);
    }

    /// Send one request and return the decoded JSON body.
    ///
    /// An empty success body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` on transport failure or a non-2xx status. Unless
    /// `report` is `Silent` the failure is also shown as an error toast.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        report: ErrorReport,
    ) -> Result<Value, RequestError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer: self.auth.bearer_token(),
            body,
        };
        debug!(?method, path, "sending request");

        let result = match self.transport.send(request).await {
            Ok(response) => decode(response),
            Err(err) => Err(RequestError::from(err)),
        };

        match &result {
            Ok(_) => debug!(?method, path, "request succeeded"),
            Err(err) => {
                warn!(?method, path, status = ?err.status(), error = %err, "request failed");
                if report == ErrorReport::Notify {
                    self.notifier.notify(ToastLevel::Error, &err.user_message());
                }
            }
        }
        result
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`]; also fails when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        report: ErrorReport,
    ) -> Result<T, RequestError> {
        let value = self.request(Method::Get, path, None, report).await?;
        self.typed(value, report)
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`]; also fails when `body` cannot be encoded or
    /// the reply does not match `T`.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        report: ErrorReport,
    ) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(RequestError::Encode)?;
        let value = self.request(Method::Post, path, Some(body), report).await?;
        self.typed(value, report)
    }

    fn typed<T: DeserializeOwned>(&self, value: Value, report: ErrorReport) -> Result<T, RequestError> {
        serde_json::from_value(value).map_err(|err| {
            let err = RequestError::Decode(err);
            warn!(error = %err, "response did not match the expected shape");
            if report == ErrorReport::Notify {
                self.notifier.notify(ToastLevel::Error, &err.user_message());
            }
            err
        })
    }
}

fn decode(response: ApiResponse) -> Result<Value, RequestError> {
    let parsed = if response.body.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Null)
    } else {
        serde_json::from_slice::<Value>(&response.body)
    };

    if response.is_success() {
        return parsed.map_err(RequestError::Decode);
    }

    let message = parsed
        .ok()
        .as_ref()
        .and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(GENERIC_REQUEST_FAILURE)
        .to_string();
    Err(RequestError::Status {
        status: response.status,
        message,
    })
}
