use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{cep::Cep, config::Config, error::Error, model::Address, net};

/// Client for the ViaCEP postal-code directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base: String,
    http: Client,
    deadline: Duration,
}

impl DirectoryClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base: config.endpoints.viacep.clone(),
            http: Client::new(),
            deadline: config.deadline(),
        }
    }

    /// Resolve a validated code to a partial address.
    ///
    /// A truthy `erro` marker in an otherwise OK body means the code does
    /// not exist, reported distinctly from HTTP failure.
    pub async fn lookup(&self, cep: &Cep) -> Result<Address, Error> {
        let url = format!("{}/{}/json/", self.base, cep.digits());

        let body = net::with_deadline(self.deadline, async {
            let res = self.http.get(&url).send().await?;

            let status = res.status();
            if !status.is_success() {
                return Err(Error::http_status("ViaCEP", status.as_u16()));
            }

            Ok(res.text().await?)
        })
        .await?;

        let parsed: ViaCepBody = serde_json::from_str(&body)?;

        if parsed.not_found() {
            return Err(Error::NotFound);
        }

        Ok(Address {
            street: parsed.logradouro.unwrap_or_default(),
            neighborhood: parsed.bairro.unwrap_or_default(),
            city: parsed.localidade.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepBody {
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    // The service has emitted both `"erro": true` and `"erro": "true"`.
    #[serde(default)]
    erro: Option<Value>,
}

impl ViaCepBody {
    fn not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => text == "true",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, timeout_ms: u64) -> DirectoryClient {
        let config = Config {
            timeout_ms,
            endpoints: Endpoints { viacep: server.uri(), ..Endpoints::default() },
            ..Config::default()
        };
        DirectoryClient::new(&config)
    }

    fn cep() -> Cep {
        Cep::parse("01310-100").unwrap()
    }

    #[tokio::test]
    async fn lookup_populates_address_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let address = client(&server, 8_000).lookup(&cep()).await.unwrap();

        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.neighborhood, "Bela Vista");
        assert_eq!(address.city, "São Paulo");
    }

    #[tokio::test]
    async fn missing_sub_fields_render_as_empty_strings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/01310100/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localidade": "São Paulo"
            })))
            .mount(&server)
            .await;

        let address = client(&server, 8_000).lookup(&cep()).await.unwrap();

        assert_eq!(address.street, "");
        assert_eq!(address.neighborhood, "");
        assert_eq!(address.city, "São Paulo");
    }

    #[tokio::test]
    async fn truthy_erro_maps_to_not_found() {
        for erro in [json!(true), json!("true")] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/01310100/json/"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": erro })))
                .mount(&server)
                .await;

            let err = client(&server, 8_000).lookup(&cep()).await.unwrap_err();
            assert!(matches!(err, Error::NotFound));
        }
    }

    #[tokio::test]
    async fn non_ok_status_maps_to_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/01310100/json/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server, 8_000).lookup(&cep()).await.unwrap_err();
        assert_eq!(err.to_string(), "failed to query ViaCEP");
    }

    #[tokio::test]
    async fn slow_responses_hit_the_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/01310100/json/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client(&server, 50).lookup(&cep()).await.unwrap_err();
        assert!(matches!(err, Error::Timeout));
        assert_eq!(err.to_string(), "query timed out");
    }
}
