#[cfg(test)]
mod integration_tests {
    use crate::handlers::accounts::CreateAccountRequest;
    use crate::handlers::bills::{CreateBillRequest, UpdateBillRequest};
    use crate::handlers::goals::CreateGoalRequest;
    use crate::handlers::transactions::CreateTransactionRequest;
    use crate::handlers::users::CreateUserRequest;
    use crate::router::create_router;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::{setup_test_app, setup_test_app_state};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{BillSchedule, BillStatus, CashflowSummary};
    use rust_decimal::Decimal;
    use sea_orm::ActiveModelTrait;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn create_bill(server: &TestServer, user_id: i32, name: &str, due_date: &str, amount: &str) {
        let response = server
            .post(&format!("/api/v1/users/{}/bills", user_id))
            .json(&CreateBillRequest {
                name: name.to_string(),
                due_date: due_date.to_string(),
                amount: amount.parse::<Decimal>().unwrap(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let create_request = CreateUserRequest {
            username: "testuser".to_string(),
            email: Some("testuser@example.com".to_string()),
        };

        let response = server.post("/api/v1/users").json(&create_request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "User created successfully");
        assert_eq!(body.data["username"], "testuser");
        assert!(body.data["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/users/99999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bills_are_scoped_to_their_owner() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Owner 1 creates a bill; owner 2 has none.
        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;

        let response = server.get("/api/v1/users/1/bills").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["name"], "Rent");
        assert_eq!(body.data[0]["owner_id"], 1);

        // Owner 2 sees an empty list, not an error.
        let response = server.get("/api/v1/users/2/bills").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_foreign_bill_is_indistinguishable_from_missing() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;
        let bills: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/users/1/bills").await.json();
        let bill_id = bills.data[0]["id"].as_i64().unwrap();

        // Owner 2 can neither update nor delete owner 1's bill.
        let response = server
            .put(&format!("/api/v1/users/2/bills/{}", bill_id))
            .json(&UpdateBillRequest {
                name: Some("Hijacked".to_string()),
                due_date: None,
                amount: None,
            })
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server
            .delete(&format!("/api/v1/users/2/bills/{}", bill_id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        // The rightful owner can.
        let response = server
            .delete(&format!("/api/v1/users/1/bills/{}", bill_id))
            .await;
        response.assert_status(StatusCode::OK);

        // A second delete is a 404.
        let response = server
            .delete(&format!("/api/v1/users/1/bills/{}", bill_id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_bill_validates_input() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Unparseable due date
        let response = server
            .post("/api/v1/users/1/bills")
            .json(&CreateBillRequest {
                name: "Rent".to_string(),
                due_date: "soonish".to_string(),
                amount: Decimal::new(120000, 2),
            })
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Negative amount
        let response = server
            .post("/api/v1/users/1/bills")
            .json(&CreateBillRequest {
                name: "Rent".to_string(),
                due_date: "2025-10-05".to_string(),
                amount: Decimal::new(-1, 0),
            })
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Empty name
        let response = server
            .post("/api/v1/users/1/bills")
            .json(&CreateBillRequest {
                name: "".to_string(),
                due_date: "2025-10-05".to_string(),
                amount: Decimal::new(120000, 2),
            })
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Nothing was stored.
        let bills: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/users/1/bills").await.json();
        assert!(bills.data.is_empty());
    }

    #[tokio::test]
    async fn test_update_bill_rejects_invalid_due_date() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;
        let bills: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/users/1/bills").await.json();
        let bill_id = bills.data[0]["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/users/1/bills/{}", bill_id))
            .json(&UpdateBillRequest {
                name: None,
                due_date: Some("not a date".to_string()),
                amount: None,
            })
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        // The stored date is untouched.
        let bills: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/users/1/bills").await.json();
        assert_eq!(bills.data[0]["due_date"], "2025-10-05");
    }

    #[tokio::test]
    async fn test_bill_schedule_projects_classifies_and_orders() {
        let state = setup_test_app_state().await;

        // A legacy row with an unusable date, seeded behind the API's
        // write-time validation: it must be excluded, not break the schedule.
        model::entities::bill::ActiveModel {
            name: sea_orm::Set("Mystery".to_string()),
            due_date: sea_orm::Set("whenever".to_string()),
            amount: sea_orm::Set(Decimal::new(1000, 2)),
            owner_id: sea_orm::Set(1),
            ..Default::default()
        }
        .insert(&state.db)
        .await
        .expect("Failed to seed legacy bill");

        let server = TestServer::new(create_router(state)).unwrap();

        // Day 5 has passed by Oct 20th: rolls to November 5th.
        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;
        // Day 22 is two days out: due-soon.
        create_bill(&server, 1, "Internet", "2025-10-22", "60").await;
        // Timestamp form, day 10: rolls to November 10th.
        create_bill(&server, 1, "Water", "2025-10-10T00:00:00Z", "45").await;

        let response = server
            .get("/api/v1/users/1/bills/schedule?view=month&today=2025-10-20")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<BillSchedule> = response.json();
        assert!(body.success);

        let schedule = body.data;
        assert_eq!(schedule.as_of, date(2025, 10, 20));

        let names: Vec<&str> = schedule.bills.iter().map(|b| b.bill.name.as_str()).collect();
        assert_eq!(names, vec!["Internet", "Rent", "Water"]);

        let internet = &schedule.bills[0];
        assert_eq!(internet.due_on, date(2025, 10, 22));
        assert_eq!(internet.days_until_due, 2);
        assert_eq!(internet.status, BillStatus::DueSoon);

        let rent = &schedule.bills[1];
        assert_eq!(rent.due_on, date(2025, 11, 5));
        assert_eq!(rent.days_until_due, 16);
        assert_eq!(rent.status, BillStatus::Upcoming);

        let water = &schedule.bills[2];
        assert_eq!(water.due_on, date(2025, 11, 10));
        assert_eq!(water.status, BillStatus::Upcoming);
    }

    #[tokio::test]
    async fn test_bill_schedule_is_stable_across_calls() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;
        create_bill(&server, 1, "Internet", "2025-10-22", "60").await;

        let url = "/api/v1/users/1/bills/schedule?view=month&today=2025-10-20";
        let first: ApiResponse<BillSchedule> = server.get(url).await.json();
        // The second call is served from the input-keyed cache; the payload
        // must be identical either way.
        let second: ApiResponse<BillSchedule> = server.get(url).await.json();
        assert_eq!(first.data, second.data);
    }

    #[tokio::test]
    async fn test_bill_schedule_invalidates_when_bills_change() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;

        let url = "/api/v1/users/1/bills/schedule?view=month&today=2025-10-20";
        let before: ApiResponse<BillSchedule> = server.get(url).await.json();
        assert_eq!(before.data.bills.len(), 1);

        create_bill(&server, 1, "Internet", "2025-10-22", "60").await;

        let after: ApiResponse<BillSchedule> = server.get(url).await.json();
        assert_eq!(after.data.bills.len(), 2);
    }

    #[tokio::test]
    async fn test_bill_schedule_empty_without_bills() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/users/1/bills/schedule?today=2025-10-20")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<BillSchedule> = response.json();
        assert!(body.data.bills.is_empty());
    }

    #[tokio::test]
    async fn test_bill_schedule_defaults_to_current_date() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_bill(&server, 1, "Rent", "2025-10-05", "1200").await;

        // No query parameters: month view anchored to the ambient date.
        let response = server.get("/api/v1/users/1/bills/schedule").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cashflow_summary_month_window() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // An account to book against.
        let response = server
            .post("/api/v1/users/1/accounts")
            .json(&CreateAccountRequest {
                name: "Checking".to_string(),
                kind: "bank".to_string(),
                balance: Some(Decimal::new(245000, 2)),
                institution: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let account: ApiResponse<serde_json::Value> = response.json();
        let account_id = account.data["id"].as_i64().unwrap() as i32;

        let transactions = [
            ("2025-10-25", "3000", "income", "Employer Inc.", "Salary"),
            ("2025-10-15", "50", "expense", "Grocery Store", "Food"),
            ("2025-10-16", "20", "expense", "Corner Cafe", "Food"),
            // Outside the October window.
            ("2025-09-10", "100", "expense", "Gas Station", "Transportation"),
        ];
        for (tx_date, amount, kind, vendor, category) in transactions {
            let response = server
                .post("/api/v1/users/1/transactions")
                .json(&CreateTransactionRequest {
                    date: tx_date.parse().unwrap(),
                    amount: amount.parse().unwrap(),
                    kind: kind.to_string(),
                    vendor: vendor.to_string(),
                    category: category.to_string(),
                    notes: None,
                    account_id,
                })
                .await;
            response.assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/api/v1/users/1/transactions/summary?view=month&today=2025-10-20")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<CashflowSummary> = response.json();

        let summary = body.data;
        assert_eq!(summary.income, Decimal::new(3000, 0));
        assert_eq!(summary.expenses, Decimal::new(70, 0));
        assert_eq!(summary.net, Decimal::new(2930, 0));
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].category, "Food");
        assert_eq!(summary.by_category[0].total, Decimal::new(70, 0));
    }

    #[tokio::test]
    async fn test_transaction_rejects_unknown_kind() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users/1/transactions")
            .json(&CreateTransactionRequest {
                date: date(2025, 10, 15),
                amount: Decimal::new(5000, 2),
                kind: "transfer".to_string(),
                vendor: "Bank".to_string(),
                category: "Misc".to_string(),
                notes: None,
                account_id: 1,
            })
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_goal_crud_roundtrip() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users/1/goals")
            .json(&CreateGoalRequest {
                title: "Emergency Fund".to_string(),
                description: Some("Three months of expenses".to_string()),
                target_amount: Decimal::new(600000, 2),
                current_amount: Some(Decimal::new(150000, 2)),
                target_date: Some(date(2026, 6, 1)),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: ApiResponse<serde_json::Value> = response.json();
        let goal_id = created.data["id"].as_i64().unwrap();

        let goals: ApiResponse<Vec<serde_json::Value>> =
            server.get("/api/v1/users/1/goals").await.json();
        assert_eq!(goals.data.len(), 1);
        assert_eq!(goals.data[0]["title"], "Emergency Fund");

        // Foreign owner cannot delete it.
        let response = server
            .delete(&format!("/api/v1/users/2/goals/{}", goal_id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server
            .delete(&format!("/api/v1/users/1/goals/{}", goal_id))
            .await;
        response.assert_status(StatusCode::OK);
    }
}
