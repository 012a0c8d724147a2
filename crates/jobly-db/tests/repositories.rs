//! Repository tests against a live PostgreSQL database.
//!
//! These share one database and reset it per test, so run them serially:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/jobly_test \
//!     cargo test -p jobly-db --test repositories -- --ignored --test-threads=1
//! ```

use jobly_core::config::DatabaseConfig;
use jobly_db::{
    CompanyRepository, CompanyUpdate, Database, JobRepository, JobUpdate, NewCompany, NewJob,
    NewUser, UserRepository, UserUpdate,
};
use jobly_queries::companies::CompanyFilter;
use jobly_queries::jobs::JobFilter;

async fn try_connect() -> Option<Database> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        url,
        pool_size: 2,
        pool_timeout_seconds: 5,
    };
    let db = Database::connect(&config)
        .await
        .expect("Failed to connect to DATABASE_URL");
    db.migrate().await.expect("Failed to run migrations");
    seed(&db).await;
    Some(db)
}

async fn seed(db: &Database) {
    sqlx::query("TRUNCATE applications, jobs, users, companies RESTART IDENTITY")
        .execute(db.pool())
        .await
        .unwrap();

    let companies = CompanyRepository::new(db.pool().clone());
    for (handle, name, employees) in [("c1", "C1", 1), ("c2", "C2", 2), ("c3", "C3", 3)] {
        companies
            .create(NewCompany {
                handle: handle.into(),
                name: name.into(),
                description: format!("Desc{}", employees),
                num_employees: Some(employees),
                logo_url: Some(format!("http://{}.img", handle)),
            })
            .await
            .unwrap();
    }

    let jobs = JobRepository::new(db.pool().clone());
    for (title, salary, equity, handle) in [
        ("c1Job", 100, 0.1, "c1"),
        ("c2Job", 200, 0.2, "c2"),
        ("c3Job", 300, 0.0, "c3"),
    ] {
        jobs.create(NewJob {
            title: title.into(),
            salary: Some(salary),
            equity: Some(equity),
            company_handle: handle.into(),
        })
        .await
        .unwrap();
    }

    let users = UserRepository::new(db.pool().clone());
    for name in ["u1", "u2"] {
        users
            .register(NewUser {
                username: name.into(),
                password: format!("password{}", &name[1..]),
                first_name: format!("{}F", name.to_uppercase()),
                last_name: format!("{}L", name.to_uppercase()),
                email: format!("{}@email.com", name),
                is_admin: false,
            })
            .await
            .unwrap();
    }
}

macro_rules! connect_or_skip {
    () => {
        match try_connect().await {
            Some(db) => db,
            None => {
                eprintln!("DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}

// ============================================================================
// Companies
// ============================================================================

#[tokio::test]
#[ignore]
async fn test_company_find_all_unfiltered() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let all = repo.find_all(&CompanyFilter::default()).await.unwrap();
    let handles: Vec<_> = all.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["c1", "c2", "c3"]);
}

#[tokio::test]
#[ignore]
async fn test_company_find_all_filtered() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let filter = CompanyFilter {
        name: Some("c".into()),
        min_employees: Some(2),
        max_employees: Some(2),
    };
    let found = repo.find_all(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].handle, "c2");
}

#[tokio::test]
#[ignore]
async fn test_company_find_all_no_match_is_empty() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let filter = CompanyFilter {
        name: Some("nope".into()),
        ..Default::default()
    };
    assert!(repo.find_all(&filter).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_company_name_filter_is_literal() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let filter = CompanyFilter {
        name: Some("%".into()),
        ..Default::default()
    };
    assert!(repo.find_all(&filter).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_company_create_duplicate() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let err = repo
        .create(NewCompany {
            handle: "c1".into(),
            name: "Other".into(),
            description: "Dup".into(),
            num_employees: None,
            logo_url: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
#[ignore]
async fn test_company_duplicate_name_is_conflict() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let err = repo
        .create(NewCompany {
            handle: "c9".into(),
            name: "C1".into(),
            description: "Dup".into(),
            num_employees: None,
            logo_url: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(err.to_string(), "Duplicate company name: C1");

    let err = repo
        .update(
            "c2",
            CompanyUpdate {
                name: Some("C1".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(repo.get("c2").await.unwrap().company.name, "C2");
}

#[tokio::test]
#[ignore]
async fn test_company_get_includes_jobs() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let detail = repo.get("c1").await.unwrap();
    assert_eq!(detail.company.name, "C1");
    assert_eq!(detail.jobs.len(), 1);
    assert_eq!(detail.jobs[0].title, "c1Job");

    assert_eq!(repo.get("nope").await.unwrap_err().status_code(), 404);
}

#[tokio::test]
#[ignore]
async fn test_company_update_and_remove() {
    let db = connect_or_skip!();
    let repo = CompanyRepository::new(db.pool().clone());

    let updated = repo
        .update(
            "c1",
            CompanyUpdate {
                num_employees: Some(10),
                logo_url: Some("http://new.img".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.num_employees, Some(10));
    assert_eq!(updated.logo_url.as_deref(), Some("http://new.img"));
    assert_eq!(updated.name, "C1");

    let err = repo.update("c1", CompanyUpdate::default()).await.unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = repo
        .update(
            "nope",
            CompanyUpdate {
                name: Some("x".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    repo.remove("c1").await.unwrap();
    assert_eq!(repo.remove("c1").await.unwrap_err().status_code(), 404);
}

// ============================================================================
// Jobs
// ============================================================================

#[tokio::test]
#[ignore]
async fn test_job_find_all_filters() {
    let db = connect_or_skip!();
    let repo = JobRepository::new(db.pool().clone());

    let all = repo.find_all(&JobFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let with_equity = repo
        .find_all(&JobFilter {
            has_equity: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    let titles: Vec<_> = with_equity.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["c1Job", "c2Job"]);

    let well_paid = repo
        .find_all(&JobFilter {
            min_salary: Some(150),
            has_equity: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(well_paid.len(), 2);

    let none = repo
        .find_all(&JobFilter {
            min_salary: Some(1_000_000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_job_create_duplicate_and_unknown_company() {
    let db = connect_or_skip!();
    let repo = JobRepository::new(db.pool().clone());

    let err = repo
        .create(NewJob {
            title: "c1Job".into(),
            salary: None,
            equity: None,
            company_handle: "c1".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "c1Job already exists at c1");

    let err = repo
        .create(NewJob {
            title: "orphan".into(),
            salary: None,
            equity: None,
            company_handle: "nope".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
#[ignore]
async fn test_job_get_update_remove() {
    let db = connect_or_skip!();
    let repo = JobRepository::new(db.pool().clone());

    let job = repo.get(1).await.unwrap();
    assert_eq!(job.title, "c1Job");

    let updated = repo
        .update(
            1,
            JobUpdate {
                salary: Some(500),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.salary, Some(500));
    assert_eq!(updated.title, "c1Job");

    repo.remove(1).await.unwrap();
    assert_eq!(repo.get(1).await.unwrap_err().status_code(), 404);
    assert_eq!(repo.remove(1).await.unwrap_err().status_code(), 404);
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
#[ignore]
async fn test_user_authenticate() {
    let db = connect_or_skip!();
    let repo = UserRepository::new(db.pool().clone());

    let user = repo.authenticate("u1", "password1").await.unwrap();
    assert_eq!(user.first_name, "U1F");

    assert_eq!(
        repo.authenticate("u1", "wrong").await.unwrap_err().status_code(),
        401
    );
    assert_eq!(
        repo.authenticate("nope", "password1").await.unwrap_err().status_code(),
        401
    );
}

#[tokio::test]
#[ignore]
async fn test_user_register_duplicate() {
    let db = connect_or_skip!();
    let repo = UserRepository::new(db.pool().clone());

    let err = repo
        .register(NewUser {
            username: "u1".into(),
            password: "password".into(),
            first_name: "F".into(),
            last_name: "L".into(),
            email: "dup@email.com".into(),
            is_admin: false,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
#[ignore]
async fn test_user_update_password() {
    let db = connect_or_skip!();
    let repo = UserRepository::new(db.pool().clone());

    repo.update(
        "u1",
        UserUpdate {
            password: Some("new-password".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(repo.authenticate("u1", "new-password").await.is_ok());
    assert!(repo.authenticate("u1", "password1").await.is_err());
}

#[tokio::test]
#[ignore]
async fn test_user_apply() {
    let db = connect_or_skip!();
    let repo = UserRepository::new(db.pool().clone());

    repo.apply("u1", 1).await.unwrap();
    assert_eq!(repo.get("u1").await.unwrap().jobs, vec![1]);

    assert_eq!(repo.apply("u1", 1).await.unwrap_err().status_code(), 400);
    assert_eq!(repo.apply("u1", 999).await.unwrap_err().status_code(), 404);
    assert_eq!(repo.apply("nope", 1).await.unwrap_err().status_code(), 404);
}

#[tokio::test]
#[ignore]
async fn test_user_find_all_and_remove() {
    let db = connect_or_skip!();
    let repo = UserRepository::new(db.pool().clone());

    let users = repo.find_all().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["u1", "u2"]);

    repo.remove("u1").await.unwrap();
    assert_eq!(repo.get("u1").await.unwrap_err().status_code(), 404);
}
