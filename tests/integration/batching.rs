//! Splitting trip id lists into requests of at most 150 ids.

use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

use abax_sdk::client::{batch_count, MAX_BATCH_SIZE};
use abax_sdk::ErrorKind;

use crate::common::{client, mock_api};

fn trip_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("trip-{i:04}")).collect()
}

fn requested_ids(request: &Request) -> Vec<String> {
    request
        .url
        .query_pairs()
        .filter(|(key, _)| key == "trip_ids")
        .map(|(_, id)| id.into_owned())
        .collect()
}

fn echo_expenses(request: &Request) -> ResponseTemplate {
    let items: Vec<_> = requested_ids(request)
        .into_iter()
        .map(|id| serde_json::json!({ "trip_id": id, "expense": { "parking": 10 }, "extra": {} }))
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": items }))
}

fn echo_odometer(request: &Request) -> ResponseTemplate {
    let items: Vec<_> = requested_ids(request)
        .into_iter()
        .map(|id| serde_json::json!({ "trip_id": id }))
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": items }))
}

#[tokio::test]
async fn request_count_matches_batch_count() {
    for len in [0usize, 1, 149, 150, 151, 300, 451] {
        let server = mock_api().await;
        let expected = batch_count(len, MAX_BATCH_SIZE);

        Mock::given(method("GET"))
            .and(path("/v1/trips/expense"))
            .respond_with(echo_expenses)
            .expect(expected as u64)
            .mount(&server)
            .await;

        let ids = trip_ids(len);
        let expenses = client(&server).list_trip_expenses(&ids).await.unwrap();

        let returned: Vec<_> = expenses.into_iter().map(|e| e.trip_id).collect();
        assert_eq!(returned, ids, "order for {len} ids");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), expected, "requests for {len} ids");
        assert!(requests
            .iter()
            .all(|r| requested_ids(r).len() <= MAX_BATCH_SIZE));
    }
}

#[tokio::test]
async fn sequential_batches_are_contiguous_chunks() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/trips/odometerReadings"))
        .respond_with(echo_odometer)
        .expect(3)
        .mount(&server)
        .await;

    let ids = trip_ids(320);
    let values = client(&server)
        .get_odometer_values_of_trips(&ids)
        .await
        .unwrap();
    assert_eq!(values.len(), 320);

    let requests = server.received_requests().await.unwrap();
    let chunks: Vec<_> = requests.iter().map(requested_ids).collect();
    assert_eq!(chunks[0], ids[..150]);
    assert_eq!(chunks[1], ids[150..300]);
    assert_eq!(chunks[2], ids[300..]);
}

#[tokio::test]
async fn failing_batch_fails_the_whole_call() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/v1/trips/expense"))
        .respond_with(echo_expenses)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/trips/expense"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_trip_expenses(&trip_ids(400))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::RequestFailed { status: 403, .. }));
}
