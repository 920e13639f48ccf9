//! "Fetch all" pagination.

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use abax_sdk::client::{MAX_PAGE_SIZE, PAGE_SIZE_ALL};
use abax_sdk::{ListTripsInput, ListVehiclesInput};

use crate::common::{client, mock_api, vehicle_page};

fn trip(id: String) -> serde_json::Value {
    let point = serde_json::json!({
        "location": {
            "latitude": 59.91,
            "longitude": 10.75,
            "timestamp": "2024-01-01T08:00:00Z",
            "signal_source": "Gps"
        }
    });
    serde_json::json!({
        "id": id,
        "vehicle": { "id": "v1", "commercial_class": "Company" },
        "start": point,
        "finish": point,
        "commercial_class": "BusinessTrip",
        "source": "Automatic"
    })
}

fn trip_page(page: u32, count: usize) -> ResponseTemplate {
    let items: Vec<_> = (0..count).map(|i| trip(format!("p{page}-{i}"))).collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "page": page,
        "page_size": MAX_PAGE_SIZE,
        "items": items
    }))
}

fn january() -> ListTripsInput {
    ListTripsInput::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
}

#[tokio::test]
async fn fetch_all_trips_walks_until_short_page() {
    let server = mock_api().await;

    for (page, count) in [(1u32, 1500usize), (2, 1500), (3, 200)] {
        Mock::given(method("GET"))
            .and(path("/v1/trips"))
            .and(query_param("page", page.to_string().as_str()))
            .and(query_param("page_size", "1500"))
            .and(query_param("date_from", "2024-01-01"))
            .and(query_param("date_to", "2024-01-31"))
            .respond_with(trip_page(page, count))
            .expect(1)
            .mount(&server)
            .await;
    }

    let trips = client(&server).list_trips(january().all()).await.unwrap();

    assert_eq!(trips.items.len(), 3200);
    assert_eq!(trips.page, 1);
    assert_eq!(trips.page_size, PAGE_SIZE_ALL);
    assert_eq!(trips.items[0].id, "p1-0");
    assert_eq!(trips.items[1500].id, "p2-0");
    assert_eq!(trips.items[3199].id, "p3-199");

    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn exact_multiple_costs_one_empty_page() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/trips"))
        .and(query_param("page", "1"))
        .respond_with(trip_page(1, 1500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/trips"))
        .and(query_param("page", "2"))
        .respond_with(trip_page(2, 0))
        .expect(1)
        .mount(&server)
        .await;

    let trips = client(&server).list_trips(january().all()).await.unwrap();
    assert_eq!(trips.items.len(), 1500);
}

#[tokio::test]
async fn explicit_page_size_fetches_one_page() {
    let server = mock_api().await;

    let ids: Vec<String> = (0..25).map(|i| format!("v{i}")).collect();
    Mock::given(method("GET"))
        .and(path("/v1/vehicles"))
        .and(query_param("page", "3"))
        .and(query_param("page_size", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vehicle_page(3, 25, &ids)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .list_vehicles(ListVehiclesInput::page(3, 25))
        .await
        .unwrap();

    assert_eq!(page.page, 3);
    assert_eq!(page.page_size, 25);
    assert_eq!(page.items.len(), 25);
}

#[tokio::test]
async fn failing_page_fails_fetch_all() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/trips"))
        .and(query_param("page", "1"))
        .respond_with(trip_page(1, 1500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/trips"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_trips(january().all())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}
