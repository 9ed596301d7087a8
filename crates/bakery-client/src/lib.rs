use std::time::Duration;

use anyhow::Context;
use bakery_types::domain::baked_good::BakedGood;
use bakery_types::domain::bakery::Bakery;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Clone)]
pub struct BakeryClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

/// Typed client for the Bakery GET API.
#[derive(Clone)]
pub struct BakeryClient {
    base: Url,
    client: reqwest::Client,
}

impl BakeryClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<BakeryClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(BakeryClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    async fn get(&self, path: &str) -> anyhow::Result<reqwest::Response> {
        let res = self
            .client
            .get(self.url(path)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        Ok(self.get(path).await?.json().await?)
    }

    /// Like `get_json`, but an API 404 (`{"error": ...}` body) means "no such record".
    /// Any other 404, such as an unknown route, is an error.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<Option<T>> {
        let res = self.client.get(self.url(path)?).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            let body = res.text().await?;
            return match serde_json::from_str::<ApiError>(&body) {
                Ok(err) => {
                    tracing::debug!(path, error = %err.error, "record not found");
                    Ok(None)
                }
                Err(_) => Err(anyhow::anyhow!("unexpected 404 from {path}: {body:?}")),
            };
        }
        Ok(Some(res.error_for_status()?.json().await?))
    }

    pub async fn welcome(&self) -> anyhow::Result<String> {
        Ok(self.get("").await?.text().await?)
    }

    pub async fn list_bakeries(&self) -> anyhow::Result<Vec<Bakery>> {
        self.get_json("bakeries").await
    }

    pub async fn get_bakery(&self, id: i64) -> anyhow::Result<Option<Bakery>> {
        self.get_optional(&format!("bakeries/{id}")).await
    }

    pub async fn baked_goods_by_price(&self) -> anyhow::Result<Vec<BakedGood>> {
        self.get_json("baked_goods/by_price").await
    }

    pub async fn most_expensive_baked_good(&self) -> anyhow::Result<Option<BakedGood>> {
        self.get_optional("baked_goods/most_expensive").await
    }
}

impl BakeryClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<BakeryClient> {
        if let Some(client) = self.client {
            return Ok(BakeryClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(BakeryClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn welcome_and_bakeries() {
        let server = MockServer::start();

        let index_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<h1>Bakery GET API</h1>");
        });

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/bakeries");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Sweet Treats", "created_at": "2024-01-01 10:00:00"}
            ]));
        });

        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/bakeries/1").header("x-trace", "abc");
            then.status(200).json_body(
                json!({"id": 1, "name": "Sweet Treats", "created_at": "2024-01-01 10:00:00"}),
            );
        });

        let client = BakeryClient::builder(&server.base_url())
            .unwrap()
            .with_header("x-trace", "abc")
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.welcome().await.unwrap(), "<h1>Bakery GET API</h1>");

        let listed = client.list_bakeries().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Sweet Treats");

        let fetched = client.get_bakery(1).await.unwrap().unwrap();
        assert_eq!(fetched.created_at.to_string(), "2024-01-01 10:00:00");

        index_mock.assert();
        list_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn baked_goods_and_not_found() {
        let server = MockServer::start();

        let by_price_mock = server.mock(|when, then| {
            when.method(GET).path("/baked_goods/by_price");
            then.status(200).json_body(json!([
                {"id": 2, "name": "Cake", "price": 25.0, "created_at": "2024-01-01 10:00:00"},
                {"id": 1, "name": "Croissant", "price": 3.5, "created_at": "2024-01-01 10:00:00"}
            ]));
        });

        let missing_top = server.mock(|when, then| {
            when.method(GET).path("/baked_goods/most_expensive");
            then.status(404)
                .json_body(json!({"error": "No baked goods found"}));
        });

        let missing_bakery = server.mock(|when, then| {
            when.method(GET).path("/bakeries/9");
            then.status(404).json_body(json!({"error": "Bakery not found"}));
        });

        let broken = server.mock(|when, then| {
            when.method(GET).path("/bakeries");
            then.status(500).json_body(json!({"error": "internal error"}));
        });

        let client = BakeryClient::new(&server.base_url()).unwrap();

        let goods = client.baked_goods_by_price().await.unwrap();
        assert_eq!(goods[0].name, "Cake");
        assert_eq!(goods[0].bakery_id, None);

        assert!(client.most_expensive_baked_good().await.unwrap().is_none());
        assert!(client.get_bakery(9).await.unwrap().is_none());
        assert!(client.list_bakeries().await.is_err());

        by_price_mock.assert();
        missing_top.assert();
        missing_bakery.assert();
        broken.assert();
    }

    #[tokio::test]
    async fn unknown_route_404_is_an_error() {
        let server = MockServer::start();

        let no_route = server.mock(|when, then| {
            when.method(GET).path("/api/bakeries/1");
            then.status(404);
        });

        let client = BakeryClient::new(&format!("{}/api/", server.base_url())).unwrap();
        let err = client.get_bakery(1).await.unwrap_err();
        assert!(err.to_string().contains("unexpected 404"));

        no_route.assert();
    }
}
