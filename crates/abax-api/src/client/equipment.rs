use abax_client::{Error, ErrorKind, Page, Result, Transport};
use tracing::instrument;

use crate::equipment::{
    Equipment, EquipmentLog, ListEquipmentInput, ListEquipmentLogsInput, GET_EQUIPMENT,
    LIST_EQUIPMENT, LIST_EQUIPMENT_LOGS,
};

impl<T: Transport> super::AbaxClient<T> {
    /// Get one piece of equipment by id.
    ///
    /// Required scopes: `abax_profile`, `open_api`, `open_api.equipment`.
    #[instrument(skip(self))]
    pub async fn get_equipment(&self, id: &str) -> Result<Equipment> {
        if id.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput(
                "equipment id must not be empty".to_string(),
            )));
        }
        self.executor.call(&GET_EQUIPMENT, &id.to_string()).await
    }

    /// Get a page of equipment.
    ///
    /// Required scopes: `abax_profile`, `open_api`, `open_api.equipment`.
    #[instrument(skip(self))]
    pub async fn list_equipment(&self, input: ListEquipmentInput) -> Result<Page<Equipment>> {
        self.list_paged(&LIST_EQUIPMENT, &input).await
    }

    /// Get a page of equipment usage logs.
    ///
    /// Required scopes: `abax_profile`, `open_api`, `open_api.equipment`.
    #[instrument(skip(self))]
    pub async fn list_equipment_logs(
        &self,
        input: ListEquipmentLogsInput,
    ) -> Result<Page<EquipmentLog>> {
        self.list_paged(&LIST_EQUIPMENT_LOGS, &input).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{AbaxClient, ListEquipmentInput};
    use abax_client::{ClientConfig, ErrorKind};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AbaxClient {
        let config = ClientConfig::builder().with_base_url(server.uri()).build();
        AbaxClient::with_config(config, "test-key").unwrap()
    }

    fn equipment(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "unit": { "id": "u1", "type": "Tracker", "health": "Healthy", "status": "Active" },
            "organization": { "id": "org", "name": "Org AS" }
        })
    }

    #[tokio::test]
    async fn test_get_equipment_wiremock() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/equipment/e1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(equipment("e1")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let equipment = client(&mock_server).get_equipment("e1").await.unwrap();
        assert_eq!(equipment.id, "e1");
    }

    #[tokio::test]
    async fn test_get_equipment_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/equipment/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .get_equipment("missing")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Not able to perform request"));
    }

    #[tokio::test]
    async fn test_get_equipment_empty_id() {
        let mock_server = MockServer::start().await;
        let err = client(&mock_server).get_equipment("").await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_list_equipment_wiremock() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/equipment/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "page_size": 10,
                "items": [equipment("e1"), equipment("e2")]
            })))
            .mount(&mock_server)
            .await;

        let input = ListEquipmentInput {
            page: Some(1),
            page_size: Some(10),
            unit_types: None,
        };
        let page = client(&mock_server).list_equipment(input).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_size, 10);
    }
}
