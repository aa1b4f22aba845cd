//! `Transport` over the browser's `fetch`.

use roster_core::{HttpRequest, HttpResponse, Transport, TransportError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Runs requests through `window.fetch`. Every status code resolves to a
/// response; only a rejected promise is a transport failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let req = Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
        for (name, value) in &request.headers {
            req.headers().set(name, value).map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| TransportError::new("no window"))?;
        let value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(js_error)?;
        let response: Response = value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(HttpResponse {
            status: response.status(),
            headers: Vec::new(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::new(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
