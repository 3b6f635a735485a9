//! Tests for the employee administration service.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::{AUTHORIZATION, MockUpstreamGateway, UpstreamMethod, UpstreamResponse};

fn token() -> BearerToken {
    BearerToken::new("admin-token").expect("non-empty token")
}

fn expect_request(
    gateway: &mut MockUpstreamGateway,
    method: UpstreamMethod,
    path: &'static str,
    response: Result<UpstreamResponse, UpstreamError>,
) {
    gateway
        .expect_send()
        .withf(move |request| {
            request.method() == method
                && request.path() == path
                && request.header(AUTHORIZATION) == Some("Bearer admin-token")
        })
        .times(1)
        .return_once(move |_| response);
}

#[tokio::test]
async fn lists_employees_verbatim() {
    let employees = json!([{"id": 1, "name": "Alice", "username": "alice", "role": "EMPLOYEE"}]);
    let mut gateway = MockUpstreamGateway::new();
    expect_request(
        &mut gateway,
        UpstreamMethod::Get,
        "/api/admin/employees",
        Ok(UpstreamResponse::json(200, employees.clone())),
    );

    let service = UpstreamEmployeeService::new(Arc::new(gateway));
    let body = service.get_all_employees(&token()).await.expect("list succeeds");

    assert_eq!(body, employees);
}

#[tokio::test]
async fn create_forwards_draft_body() {
    let draft = EmployeeDraft::try_from_parts(Some("Bob"), Some("bob"), Some("pw"))
        .expect("complete draft");
    let mut gateway = MockUpstreamGateway::new();
    gateway
        .expect_send()
        .withf(|request| {
            request.method() == UpstreamMethod::Post
                && request.path() == "/api/admin/employees"
                && request.body() == Some(&json!({"name": "Bob", "username": "bob", "password": "pw"}))
        })
        .times(1)
        .return_once(|_| {
            Ok(UpstreamResponse::json(
                201,
                json!({"id": 7, "name": "Bob", "username": "bob", "role": "EMPLOYEE"}),
            ))
        });

    let service = UpstreamEmployeeService::new(Arc::new(gateway));
    let body = service
        .create_employee(&token(), &draft)
        .await
        .expect("create succeeds");

    assert_eq!(body.get("id"), Some(&json!(7)));
}

#[tokio::test]
async fn update_targets_employee_path_and_omits_blank_password() {
    let update = EmployeeUpdate::try_from_parts(Some("Bob"), Some("bobby"), Some(""))
        .expect("name and username present");
    let mut gateway = MockUpstreamGateway::new();
    gateway
        .expect_send()
        .withf(|request| {
            request.method() == UpstreamMethod::Put
                && request.path() == "/api/admin/employees/7"
                && request.body() == Some(&json!({"name": "Bob", "username": "bobby"}))
        })
        .times(1)
        .return_once(|_| Ok(UpstreamResponse::json(200, json!({"id": 7}))));

    let service = UpstreamEmployeeService::new(Arc::new(gateway));
    service
        .update_employee(&token(), EmployeeId::new(7), &update)
        .await
        .expect("update succeeds");
}

#[tokio::test]
async fn delete_succeeds_on_empty_body() {
    let mut gateway = MockUpstreamGateway::new();
    expect_request(
        &mut gateway,
        UpstreamMethod::Delete,
        "/api/admin/employees/3",
        Ok(UpstreamResponse::empty(204)),
    );

    let service = UpstreamEmployeeService::new(Arc::new(gateway));
    service
        .delete_employee(&token(), EmployeeId::new(3))
        .await
        .expect("empty 204 is success");
}

#[tokio::test]
async fn weekly_hours_hits_admin_endpoint() {
    let mut gateway = MockUpstreamGateway::new();
    expect_request(
        &mut gateway,
        UpstreamMethod::Get,
        "/api/admin/weekly-hours",
        Ok(UpstreamResponse::json(200, json!([{"employeeId": 1, "totalHours": 38.5}]))),
    );

    let service = UpstreamEmployeeService::new(Arc::new(gateway));
    let body = service
        .get_all_employees_weekly_hours(&token())
        .await
        .expect("weekly hours succeed");

    assert_eq!(body, json!([{"employeeId": 1, "totalHours": 38.5}]));
}

#[rstest]
#[case(UpstreamError::rejected(409_u16, "Username already exists", json!({"error": "Username already exists"})))]
#[case(UpstreamError::rejected(403_u16, "Forbidden", serde_json::Value::Null))]
#[case(UpstreamError::unreachable("connection refused"))]
#[tokio::test]
async fn failures_propagate_unchanged(#[case] failure: UpstreamError) {
    let expected = failure.clone();
    let mut gateway = MockUpstreamGateway::new();
    gateway.expect_send().times(1).return_once(move |_| Err(failure));

    let service = UpstreamEmployeeService::new(Arc::new(gateway));
    let err = service
        .delete_employee(&token(), EmployeeId::new(1))
        .await
        .expect_err("failure propagates");

    assert_eq!(err, expected);
}
