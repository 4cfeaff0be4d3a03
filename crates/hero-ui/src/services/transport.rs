//! Browser fetch transport.

use crate::services::http::{
    Method, OutboundRequest, RequestBody, Transport, TransportError, TransportResponse, UploadFile,
};
use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{Blob, BlobPropertyBag, FormData};

/// [`Transport`] backed by `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let mut req = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(text) => req.body(text),
            RequestBody::Multipart { field, file } => req.body(multipart(field, &file)?),
        };

        let response = req
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}

fn multipart(field: &str, file: &UploadFile) -> Result<FormData, TransportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    if let Some(mime) = &file.mime {
        options.set_type(mime);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| TransportError::Build(format!("blob: {err:?}")))?;
    let form = FormData::new().map_err(|err| TransportError::Build(format!("form-data: {err:?}")))?;
    form.append_with_blob_and_filename(field, &blob, &file.name)
        .map_err(|err| TransportError::Build(format!("attach file: {err:?}")))?;
    Ok(form)
}
