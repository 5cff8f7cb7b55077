//! Integration tests for resource handles and pagination using wiremock
//!
//! Each test mounts the endpoint a resource operation should hit, so a wrong
//! path or verb shows up as an unmatched request.

use futures::TryStreamExt;
use serde_json::json;
use swapi_lib::SwapiClient;
use swapi_lib::api::UploadFile;
use swapi_lib::error::ApiError;
use swapi_lib::error::Error;
use swapi_lib::query::Query;
use wiremock::matchers::body_json;
use wiremock::matchers::body_string_contains;
use wiremock::matchers::header_regex;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

fn client_for(server: &MockServer) -> SwapiClient {
    SwapiClient::builder()
        .url(server.uri())
        .token("test-token")
        .build()
        .expect("client should build")
}

async fn expect_call(server: &MockServer, verb: &str, endpoint: &str) {
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(server)
        .await;
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn test_resource_verbs_and_paths() {
        let server = MockServer::start().await;

        expect_call(&server, "GET", "/api/places").await;
        expect_call(&server, "GET", "/api/places/7").await;
        expect_call(&server, "GET", "/api/places/meta").await;
        expect_call(&server, "GET", "/api/places/autoselect").await;
        expect_call(&server, "POST", "/api/places").await;
        expect_call(&server, "PUT", "/api/places/7").await;
        expect_call(&server, "PATCH", "/api/places/7").await;
        expect_call(&server, "DELETE", "/api/places/7").await;

        let client = client_for(&server);
        let places = client.places();
        let body = json!({"name": "Depot"});

        places.list(None).await.unwrap();
        places.retrieve(7, None).await.unwrap();
        places.meta(None).await.unwrap();
        places.autoselect(None).await.unwrap();
        places.create(&body, None).await.unwrap();
        places.update(7, &body, None).await.unwrap();
        places.partial_update(7, &body, None).await.unwrap();
        places.delete(7, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_bulk_operations_send_query() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/user_profiles"))
            .and(query_param("filter[id][in]", "1,2,3"))
            .and(body_json(json!({"active": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": 3})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/user_profiles"))
            .and(query_param("filter[id][in]", "1,2,3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = Query::new().filter("id__in", vec![1, 2, 3]);

        let updated = client
            .user_profiles()
            .bulk_update(&json!({"active": false}), &query)
            .await
            .unwrap();
        assert_eq!(updated["updated"], 3);
        assert_eq!(client.user_profiles().bulk_delete(&query).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_contextual_operations() {
        let server = MockServer::start().await;

        expect_call(&server, "POST", "/api/commissions/contextual").await;
        expect_call(&server, "PUT", "/api/commissions/12/contextual").await;
        expect_call(&server, "DELETE", "/api/commissions/12/contextual").await;

        let client = client_for(&server);
        let commissions = client.commissions();
        let body = json!({"description": "Boiler inspection"});

        commissions.contextual_create(&body, None).await.unwrap();
        commissions.contextual_update(12, &body, None).await.unwrap();
        commissions.contextual_delete(12, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_typed_retrieve() {
        #[derive(serde::Deserialize)]
        struct Place {
            id: u64,
            name: String,
        }

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/places/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "Depot"})))
            .mount(&server)
            .await;

        let place: Place = client_for(&server)
            .places()
            .retrieve_as(3, None)
            .await
            .unwrap();
        assert_eq!(place.id, 3);
        assert_eq!(place.name, "Depot");
    }

    #[tokio::test]
    async fn test_item_id_is_escaped() {
        let server = MockServer::start().await;

        expect_call(&server, "GET", "/api/kanbans/a%2Fb").await;

        client_for(&server).kanbans().retrieve("a/b", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found_surfaces_as_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/places/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
            .mount(&server)
            .await;

        let error = client_for(&server).places().retrieve(99, None).await.unwrap_err();
        assert!(error.is_not_found());
    }
}

mod sub_resources {
    use super::*;

    #[tokio::test]
    async fn test_nested_resource_paths() {
        let server = MockServer::start().await;

        expect_call(&server, "GET", "/api/account_companies").await;
        expect_call(&server, "GET", "/api/account_companies/5/histories").await;
        expect_call(&server, "GET", "/api/account_company_attributes").await;
        expect_call(&server, "GET", "/api/account_users/8/histories").await;
        expect_call(&server, "GET", "/api/account_user_attributes").await;
        expect_call(&server, "GET", "/api/user_users/2/histories").await;
        expect_call(&server, "GET", "/api/user_attributes").await;
        expect_call(&server, "GET", "/api/commission_attribute_criterias").await;
        expect_call(&server, "GET", "/api/commission_attribute_relations").await;
        expect_call(&server, "GET", "/api/commission_phases").await;
        expect_call(&server, "GET", "/api/commission_scope_types").await;
        expect_call(&server, "GET", "/api/commission_shortcuts").await;
        expect_call(&server, "GET", "/api/commission_users").await;
        expect_call(&server, "GET", "/api/place_attributes").await;
        expect_call(&server, "GET", "/api/product_categories").await;
        expect_call(&server, "GET", "/api/file_directories").await;
        expect_call(&server, "GET", "/api/baskets").await;

        let client = client_for(&server);

        client.account().companies().list(None).await.unwrap();
        client.account().companies().histories(5).list(None).await.unwrap();
        client.account().companies().attributes().list(None).await.unwrap();
        client.account().users().histories(8).list(None).await.unwrap();
        client.account().users().attributes().list(None).await.unwrap();
        client.users().histories(2).list(None).await.unwrap();
        client.users().attributes().list(None).await.unwrap();
        client.commissions().attributes().criterias().list(None).await.unwrap();
        client.commissions().attributes().relations().list(None).await.unwrap();
        client.commissions().phases().list(None).await.unwrap();
        client.commissions().scope_types().list(None).await.unwrap();
        client.commissions().shortcuts().list(None).await.unwrap();
        client.commissions().users().list(None).await.unwrap();
        client.places().attributes().list(None).await.unwrap();
        client.products().categories().list(None).await.unwrap();
        client.files().directories().list(None).await.unwrap();
        client.module("baskets").list(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_company_actions() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/account_companies/5/gus"))
            .and(body_json(json!({"nip": "1234567890"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/account_companies/5/odbc_reports"))
            .and(query_param("page[limit]", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;
        expect_call(&server, "GET", "/api/account_companies/5/email_messages").await;

        let client = client_for(&server);
        let companies = client.account().companies();

        companies.gus_update(5, &json!({"nip": "1234567890"})).await.unwrap();
        companies.odbc_reports(5, &Query::new().limit(20)).await.unwrap();
        companies.email_messages(5, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_pdf_sends_template_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products/4/pdf"))
            .and(query_param("template_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "/files/4.pdf"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/serviced_products/9/pdf"))
            .and(query_param("template_id", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "/files/9.pdf"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        let pdf = client.products().generate_pdf(4, 3).await.unwrap();
        assert_eq!(pdf["url"], "/files/4.pdf");
        client.serviced_products().generate_pdf(9, 0).await.unwrap();
    }

    #[tokio::test]
    async fn test_global_endpoints() {
        let server = MockServer::start().await;

        expect_call(&server, "GET", "/api").await;
        expect_call(&server, "GET", "/api/me").await;
        expect_call(&server, "GET", "/api/settings").await;
        Mock::given(method("GET"))
            .and(path("/api/audits/commissions"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        client.home().await.unwrap();
        client.me().await.unwrap();
        client.settings().await.unwrap();
        client
            .audits("commissions", &Query::new().page(2))
            .await
            .unwrap();
    }
}

mod files {
    use super::*;

    #[tokio::test]
    async fn test_upload_sends_multipart_with_mode() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/files/upload"))
            .and(query_param("mode", "1"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"report.txt\""))
            .and(body_string_contains("quarterly numbers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 77}])))
            .expect(1)
            .mount(&server)
            .await;

        let stored = client_for(&server)
            .files()
            .upload(
                vec![UploadFile::new("report.txt", b"quarterly numbers".to_vec()).mime("text/plain")],
                1,
            )
            .await
            .unwrap();
        assert_eq!(stored[0]["id"], 77);
    }

    #[tokio::test]
    async fn test_upload_custom_field_name() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/files/upload"))
            .and(body_string_contains("name=\"attachment\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .files()
            .upload(vec![UploadFile::new("a.bin", vec![0u8, 1, 2]).field("attachment")], 0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_mime() {
        let server = MockServer::start().await;

        let result = client_for(&server)
            .files()
            .upload(vec![UploadFile::new("a.bin", vec![1u8]).mime("not a mime")], 0)
            .await;

        assert!(matches!(result, Err(Error::HttpClient(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_from_urls() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/files/upload_from_urls"))
            .and(body_json(json!({"urls": ["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
            .expect(1)
            .mount(&server)
            .await;

        let stored = client_for(&server)
            .files()
            .upload_from_urls(["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"])
            .await
            .unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 2);
    }
}

mod pagination {
    use super::*;

    async fn mount_page(server: &MockServer, number: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/commissions"))
            .and(query_param("page[number]", number))
            .and(query_param("page[limit]", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_unreachable_page(server: &MockServer, number: &str) {
        Mock::given(method("GET"))
            .and(path("/api/commissions"))
            .and(query_param("page[number]", number))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(0)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_all_stops_at_total() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}], "meta": {"total": 3}})).await;
        mount_page(&server, "2", json!({"data": [{"id": 3}], "meta": {"total": 3}})).await;
        mount_unreachable_page(&server, "3").await;

        let items = client_for(&server)
            .commissions()
            .all(&Query::new().limit(2))
            .await
            .unwrap();

        let ids: Vec<i64> = items.iter().map(|item| item["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_all_stops_when_total_reached_on_full_page() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}], "meta": {"total": 4}})).await;
        mount_page(&server, "2", json!({"data": [{"id": 3}, {"id": 4}], "meta": {"total": 4}})).await;
        mount_unreachable_page(&server, "3").await;

        let items = client_for(&server)
            .commissions()
            .all(&Query::new().limit(2))
            .await
            .unwrap();
        assert_eq!(items.len(), 4);
    }

    #[tokio::test]
    async fn test_all_stops_on_short_page_without_total() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}]})).await;
        mount_page(&server, "2", json!({"data": [{"id": 3}]})).await;
        mount_unreachable_page(&server, "3").await;

        let items = client_for(&server)
            .commissions()
            .all(&Query::new().limit(2))
            .await
            .unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_all_stops_on_empty_page() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}]})).await;
        mount_page(&server, "2", json!({"data": []})).await;
        mount_unreachable_page(&server, "3").await;

        let items = client_for(&server)
            .commissions()
            .all(&Query::new().limit(2))
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_all_keeps_filters_and_overrides_page_number() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/commissions"))
            .and(query_param("filter[status][eq]", "open"))
            .and(query_param("page[number]", "1"))
            .and(query_param("page[limit]", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server)
            .commissions()
            .all(&Query::new().filter("status", "open").page(7))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_all_propagates_page_error() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}]})).await;
        Mock::given(method("GET"))
            .and(path("/api/commissions"))
            .and(query_param("page[number]", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .commissions()
            .all(&Query::new().limit(2))
            .await;
        assert!(matches!(result, Err(Error::Api(ApiError::Server(_)))));
    }

    #[tokio::test]
    async fn test_pages_iterator() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}], "meta": {"total": 3}})).await;
        mount_page(&server, "2", json!({"data": [{"id": 3}], "meta": {"total": 3}})).await;

        let client = client_for(&server);
        let mut pages = client.commissions().pages(&Query::new().limit(2));
        assert_eq!(pages.limit(), 2);

        let first = pages.next().await.unwrap().unwrap();
        assert_eq!(first.number(), 1);
        assert_eq!(first.total(), Some(3));
        let second = pages.next().await.unwrap().unwrap();
        assert_eq!(second.number(), 2);
        assert_eq!(second.len(), 1);
        assert!(pages.next().await.is_none());
    }

    #[tokio::test]
    async fn test_into_stream_yields_items() {
        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 1}, {"id": 2}]})).await;
        mount_page(&server, "2", json!({"data": [{"id": 3}]})).await;

        let client = client_for(&server);
        let items: Vec<serde_json::Value> = client
            .commissions()
            .pages(&Query::new().limit(2))
            .into_stream()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_all_as_decodes_items() {
        #[derive(serde::Deserialize)]
        struct Commission {
            id: u64,
        }

        let server = MockServer::start().await;

        mount_page(&server, "1", json!({"data": [{"id": 10}], "meta": {"total": 1}})).await;

        let commissions: Vec<Commission> = client_for(&server)
            .commissions()
            .all_as(&Query::new().limit(2))
            .await
            .unwrap();
        assert_eq!(commissions.len(), 1);
        assert_eq!(commissions[0].id, 10);
    }
}

mod record_sets {
    use super::*;

    #[tokio::test]
    async fn test_bulk_endpoints() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/places/bulk"))
            .and(body_json(json!({"data": [{"name": "North"}, {"name": "South"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}, {"id": 2}]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/places/bulk"))
            .and(body_json(json!({"data": [{"id": 1, "name": "Depot"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/places/bulk"))
            .and(query_param("ids", "1,2,3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let places = client.places();

        let created = places
            .bulk_create(&[json!({"name": "North"}), json!({"name": "South"})])
            .await
            .unwrap();
        assert_eq!(created["data"].as_array().unwrap().len(), 2);
        places
            .bulk_update_records(&[json!({"id": 1, "name": "Depot"})])
            .await
            .unwrap();
        assert_eq!(places.bulk_delete_ids([1u64, 2, 3]).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_generate_pdf_for_any_module() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/commissions/12/generate/pdf"))
            .and(body_json(json!({"data": {"templateId": 4}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "/files/12.pdf"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/products/3/generate/pdf"))
            .and(body_json(json!({"data": {"templateId": 0}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "/files/3.pdf"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        let pdf = client.commissions().generate_pdf(12, 4).await.unwrap();
        assert_eq!(pdf["url"], "/files/12.pdf");
        client.products().resource().generate_pdf(3, 0).await.unwrap();
    }

    #[tokio::test]
    async fn test_count_reads_total() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/commissions"))
            .and(query_param("filter[status][eq]", "open"))
            .and(query_param("page[limit]", "1"))
            .and(query_param("page[offset]", "0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [{"id": 1}], "meta": {"page": {"total_count": 57}}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let count = client_for(&server)
            .commissions()
            .count(&Query::new().filter("status", "open").limit(50))
            .await
            .unwrap();
        assert_eq!(count, 57);
    }

    #[tokio::test]
    async fn test_count_without_total_counts_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/kanbans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).kanbans().count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_first_and_exists() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/places"))
            .and(query_param("filter[name][eq]", "Depot"))
            .and(query_param("page[limit]", "1"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 3}]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/places"))
            .and(query_param("filter[name][eq]", "Nowhere"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let depot = Query::new().filter("name", "Depot");
        let nowhere = Query::new().filter("name", "Nowhere");

        assert_eq!(client.places().first(&depot).await.unwrap(), Some(json!({"id": 3})));
        assert!(client.places().exists(&depot).await.unwrap());
        assert_eq!(client.places().first(&nowhere).await.unwrap(), None);
        assert!(!client.places().exists(&nowhere).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_as_reports_undecodable_item() {
        #[derive(Debug, serde::Deserialize)]
        struct Place {
            #[allow(dead_code)]
            id: u64,
        }

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/places"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "x"}]})))
            .mount(&server)
            .await;

        let result: Result<Vec<Place>, _> = client_for(&server).places().all_as(None).await;
        match result {
            Err(Error::Decode { body, .. }) => assert_eq!(body.as_deref(), Some(r#"{"id":"x"}"#)),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_odbc_reports_and_translations() {
        let server = MockServer::start().await;

        expect_call(&server, "GET", "/api/odbc/reports").await;
        expect_call(&server, "GET", "/api/odbc/reports/6").await;
        Mock::given(method("GET"))
            .and(path("/api/additional_i18ns/commissions"))
            .and(query_param("setting[lang]", "pl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        client.odbc_reports().list(None).await.unwrap();
        client.odbc_reports().retrieve(6, None).await.unwrap();
        client
            .additional_i18ns("commissions", &Query::new().lang("pl"))
            .await
            .unwrap();
    }
}
