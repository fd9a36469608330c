use crate::api::Endpoint;
use crate::error::{Error, ErrorKind};
use crate::resource_config::ResourceConfig;
use crate::routes::Route;
use crate::transport::Transport;
use serde_json::Value;

/// Outcome of visiting `/lucky`.
#[derive(Clone, PartialEq, Debug)]
pub enum Navigation {
    Redirect(Route),
    /// Navigation is cancelled and the current view stays.
    Blocked,
}

/// Picks a random product and redirects to its page. Any failure is logged
/// and blocks the navigation.
pub async fn lucky_redirect(transport: &dyn Transport, config: &ResourceConfig) -> Navigation {
    match lucky_product_id(transport, config).await {
        Ok(id) => {
            let route = Route::Product { id };
            log::info!("lucky redirect to {}", route.path());
            Navigation::Redirect(route)
        }
        Err(error) => {
            log::error!("failed to pick a lucky product: {}", error);
            Navigation::Blocked
        }
    }
}

async fn lucky_product_id(transport: &dyn Transport, config: &ResourceConfig) -> Result<String, Error> {
    let target = Endpoint::LuckyProduct {
        only_food: config.lucky_only_food,
    }
    .url(&config.api_base_url)?;

    let body = transport.get(&target).await?;

    let id = match serde_json::from_slice::<Value>(&body) {
        Ok(id) => id,
        Err(error) => {
            return Err(Error::new(
                ErrorKind::ParseFailure,
                format!("failed to parse lucky product id: {}", error),
            ))
        }
    };

    match id {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(Error::new(
            ErrorKind::ParseFailure,
            format!("expected a product id, got {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{init_logger, mock_transport};

    #[tokio::test]
    async fn redirects_to_lucky_product() {
        init_logger();
        let (transport, mut requests) = mock_transport();
        let config = ResourceConfig::default();

        let (navigation, _) = tokio::join!(lucky_redirect(&*transport, &config), async {
            let request = requests.recv().await.unwrap();
            assert_eq!(
                request.target,
                "http://localhost:8000/product/lucky?only_food=true"
            );
            request.respond(r#""42""#);
        });

        assert_eq!(
            navigation,
            Navigation::Redirect(Route::Product {
                id: "42".to_string()
            })
        );
        if let Navigation::Redirect(route) = navigation {
            assert_eq!(route.path(), "/product/42");
        }
    }

    #[tokio::test]
    async fn numeric_id_is_accepted() {
        let (transport, mut requests) = mock_transport();
        let config = ResourceConfig::default();

        let (navigation, _) = tokio::join!(lucky_redirect(&*transport, &config), async {
            requests.recv().await.unwrap().respond("42");
        });

        assert_eq!(
            navigation,
            Navigation::Redirect(Route::Product {
                id: "42".to_string()
            })
        );
    }

    #[tokio::test]
    async fn rejection_blocks_navigation() {
        let (transport, mut requests) = mock_transport();
        let config = ResourceConfig::default();

        let (navigation, _) = tokio::join!(lucky_redirect(&*transport, &config), async {
            requests.recv().await.unwrap().reject("Unlucky.");
        });

        assert_eq!(navigation, Navigation::Blocked);
    }

    #[tokio::test]
    async fn error_payload_blocks_navigation() {
        let (transport, mut requests) = mock_transport();
        let mut config = ResourceConfig::default();
        config.lucky_only_food = false;

        let (navigation, _) = tokio::join!(lucky_redirect(&*transport, &config), async {
            let request = requests.recv().await.unwrap();
            assert!(request.target.ends_with("only_food=false"));
            request.respond(r#"{"detail":"Unlucky."}"#);
        });

        assert_eq!(navigation, Navigation::Blocked);
    }
}
