use crate::repository::{generate_employee, Employee};
use mongo_repository::document::DocumentId;
use mongo_repository::errors::ErrorKind;
use mongo_repository::filter::{all, field};
use mongo_repository::repository::ObjectRepository;
use mongo_repository_int_test::test_util::{cleanup, create_test_context, run_test};

// =============================================================================
// INSERT / GET
// =============================================================================

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_insert_then_get_by_id() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employee = generate_employee("Engineering", 5000);

            repo.insert(&employee).await?;

            let loaded = repo.get_by_id(&employee.id).await?;
            assert_eq!(loaded, Some(employee));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_get_by_absent_id_is_none() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            repo.insert(&generate_employee("Sales", 100)).await?;

            assert_eq!(repo.get_by_id(&DocumentId::new()).await?, None);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_insert_many() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employees: Vec<Employee> = (0..10)
                .map(|i| generate_employee("Support", 1000 + i))
                .collect();

            repo.insert_many(&employees).await?;

            assert_eq!(repo.count(all()).await?, 10);
            for employee in &employees {
                assert_eq!(repo.get_by_id(&employee.id).await?.as_ref(), Some(employee));
            }
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_insert_many_empty_batch_is_driver_error() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;

            let err = repo.insert_many(&[]).await.unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DriverError);
            assert!(err.driver_error().is_some());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_insert_duplicate_unique_value_fails() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let first = generate_employee("Engineering", 10);
            let mut second = generate_employee("Engineering", 20);
            second.email = first.email.clone();

            repo.insert(&first).await?;
            let err = repo.insert(&second).await.unwrap_err();

            assert_eq!(err.kind(), &ErrorKind::DriverError);
            assert!(err.is_duplicate_key());
            assert_eq!(repo.count(all()).await?, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_insert_duplicate_id_fails() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let first = generate_employee("Engineering", 10);
            let mut second = generate_employee("Engineering", 20);
            second.id = first.id;

            repo.insert(&first).await?;
            let err = repo.insert(&second).await.unwrap_err();

            assert!(err.is_duplicate_key());
            assert_eq!(repo.get_by_id(&first.id).await?, Some(first));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_insert_many_with_duplicate_fails() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let first = generate_employee("Engineering", 10);
            let mut second = generate_employee("Engineering", 20);
            second.email = first.email.clone();

            let err = repo.insert_many(&[first, second]).await.unwrap_err();
            assert!(err.is_duplicate_key());
            // ordered insert stops at the failing document
            assert_eq!(repo.count(all()).await?, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

// =============================================================================
// UPDATE
// =============================================================================

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_replaces_existing() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let mut employee = generate_employee("Engineering", 10);
            repo.insert(&employee).await?;

            employee.department = "Research".to_string();
            employee.address = None;
            let updated = repo.update(&employee).await?;

            assert_eq!(updated, employee);
            assert_eq!(repo.get_by_id(&employee.id).await?, Some(employee));
            assert_eq!(repo.count(all()).await?, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_absent_id_inserts() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employee = generate_employee("Engineering", 10);

            let updated = repo.update(&employee).await?;

            assert_eq!(updated, employee);
            assert_eq!(repo.get_by_id(&employee.id).await?, Some(employee));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_into_unique_conflict_fails() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let first = generate_employee("Engineering", 10);
            let mut second = generate_employee("Engineering", 20);
            repo.insert_many(&[first.clone(), second.clone()]).await?;

            second.email = first.email.clone();
            let err = repo.update(&second).await.unwrap_err();
            assert!(err.is_duplicate_key());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_field_by_id_changes_only_that_field() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employee = generate_employee("Engineering", 10);
            let other = generate_employee("Engineering", 10);
            repo.insert_many(&[employee.clone(), other.clone()]).await?;

            let updated = repo
                .update_field_by_id(&employee.id, "salary", 42_i64)
                .await?
                .unwrap();

            let mut expected = employee.clone();
            expected.salary = 42;
            assert_eq!(updated, expected);
            assert_eq!(repo.get_by_id(&employee.id).await?, Some(expected));
            assert_eq!(repo.get_by_id(&other.id).await?, Some(other));
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_field_by_id_nested_field() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employee = generate_employee("Engineering", 10);
            repo.insert(&employee).await?;

            let updated = repo
                .update_field_by_id(&employee.id, "address.city", "Auckland")
                .await?
                .unwrap();

            assert_eq!(updated.address.map(|a| a.city), Some("Auckland".to_string()));
            assert_eq!(updated.email, employee.email);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_field_by_absent_id_is_none() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            repo.insert(&generate_employee("Engineering", 10)).await?;

            let updated = repo
                .update_field_by_id(&DocumentId::new(), "salary", 1_i64)
                .await?;
            assert_eq!(updated, None);
            assert_eq!(repo.count(all()).await?, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_field_by_filter() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employees = vec![
                generate_employee("Sales", 100),
                generate_employee("Sales", 200),
                generate_employee("Sales", 300),
                generate_employee("Legal", 300),
            ];
            repo.insert_many(&employees).await?;

            let result = repo
                .update_field(field("department").eq("Sales"), "salary", 300_i64)
                .await?;

            assert_eq!(result.matched_count(), 3);
            assert_eq!(result.modified_count(), 2);
            assert_eq!(repo.count(field("salary").eq(300_i64)).await?, 4);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_update_field_by_filter_matching_nothing() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            repo.insert(&generate_employee("Sales", 100)).await?;

            let result = repo
                .update_field(field("department").eq("Nobody"), "salary", 1_i64)
                .await?;
            assert_eq!(result.matched_count(), 0);
            assert_eq!(result.modified_count(), 0);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

// =============================================================================
// REMOVE
// =============================================================================

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_remove_by_id_returns_snapshot() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employee = generate_employee("Engineering", 10);
            repo.insert(&employee).await?;

            let removed = repo.remove_by_id(&employee.id).await?;
            assert_eq!(removed, Some(employee.clone()));
            assert_eq!(repo.get_by_id(&employee.id).await?, None);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_remove_by_absent_id_is_none() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            repo.insert(&generate_employee("Engineering", 10)).await?;

            assert_eq!(repo.remove_by_id(&DocumentId::new()).await?, None);
            assert_eq!(repo.count(all()).await?, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_remove_by_filter() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            let employees = vec![
                generate_employee("Sales", 100),
                generate_employee("Sales", 200),
                generate_employee("Legal", 300),
            ];
            repo.insert_many(&employees).await?;

            assert_eq!(repo.remove(field("department").eq("Sales")).await?, 2);
            assert_eq!(repo.remove(field("department").eq("Sales")).await?, 0);
            assert_eq!(repo.count(all()).await?, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_clear_keeps_indexes() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            repo.insert(&generate_employee("Sales", 100)).await?;

            repo.clear().await?;

            assert_eq!(repo.count(all()).await?, 0);
            assert!(repo.has_index(vec!["email"]).await?);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_dispose_drops_collection() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            repo.insert(&generate_employee("Sales", 100)).await?;

            repo.dispose().await?;

            assert_eq!(repo.count(all()).await?, 0);
            assert!(repo.list_indexes().await?.is_empty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_concurrent_inserts_from_clones() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;

            let mut handles = Vec::new();
            for i in 0..8 {
                let repo = repo.clone();
                handles.push(tokio::spawn(async move {
                    repo.insert(&generate_employee("Ops", i)).await
                }));
            }
            for handle in handles {
                handle.await.unwrap()?;
            }

            assert_eq!(repo.count(field("department").eq("Ops")).await?, 8);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}
