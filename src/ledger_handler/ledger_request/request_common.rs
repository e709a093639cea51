use super::super::ledger_client::LedgerClient;
use super::super::ledger_response::response_common::{LedgerResponseType, ResponseError};

#[derive(Debug, Copy, Clone)]
pub(crate) enum LedgerRequestMethod {
    Get,
    Post,
}

/// One typed endpoint of the ledger REST API: where it lives, how it is
/// called and what it parses into.
pub(crate) trait LedgerRequestType {
    type Response: LedgerResponseType;
    fn endpoint(&self) -> String;
    fn request_method(&self) -> LedgerRequestMethod;
    fn header_params(&self) -> reqwest::header::HeaderMap {
        reqwest::header::HeaderMap::new()
    }

    fn builder(&self, client: &LedgerClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            LedgerRequestMethod::Get => client.client().get(url),
            LedgerRequestMethod::Post => client.client().post(url),
        };
        builder.headers(self.header_params())
    }
}

pub(crate) trait NoBodyLedgerRequestType: LedgerRequestType {
    async fn send_request(
        &self,
        client: &LedgerClient,
    ) -> Result<<Self::Response as LedgerResponseType>::ParsedResponseType, ResponseError> {
        let response = self.builder(client).send().await?;
        Self::Response::read_response(response).await
    }
}

pub(crate) trait JSONBodyLedgerRequestType: LedgerRequestType {
    type Body: serde::Serialize;
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &LedgerClient,
    ) -> Result<<Self::Response as LedgerResponseType>::ParsedResponseType, ResponseError> {
        let response = self.builder(client).json(self.body()).send().await?;
        Self::Response::read_response(response).await
    }
}
