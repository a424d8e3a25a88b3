use crate::repository::{generate_employee, generate_note, Employee, Note};
use futures::TryStreamExt;
use mongo_repository::common::SortOrder;
use mongo_repository::filter::{all, and, field, not, or, raw, text};
use mongo_repository::mongodb::bson::doc;
use mongo_repository::repository::ObjectRepository;
use mongo_repository_int_test::test_util::{cleanup, create_test_context, run_test};

async fn seed(repo: &ObjectRepository<Employee>) -> mongo_repository::errors::RepositoryResult<()> {
    let employees = vec![
        generate_employee("Sales", 100),
        generate_employee("Sales", 200),
        generate_employee("Sales", 300),
        generate_employee("Legal", 400),
        generate_employee("Legal", 500),
    ];
    repo.insert_many(&employees).await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_find_with_filter() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let sales = repo.find(field("department").eq("Sales")).to_vec().await?;
            assert_eq!(sales.len(), 3);
            assert!(sales.iter().all(|e| e.department == "Sales"));

            let rich = repo
                .find(field("salary").gt(200_i64).and(field("department").eq("Sales")))
                .count()
                .await?;
            assert_eq!(rich, 1);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_find_all_with_sort_skip_limit() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let page = repo
                .find_all()
                .sort_by("salary", SortOrder::Descending)
                .skip(1)
                .limit(2)
                .to_vec()
                .await?;

            let salaries: Vec<i64> = page.iter().map(|e| e.salary).collect();
            assert_eq!(salaries, vec![400, 300]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_first_and_count() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let lowest = repo
                .find_all()
                .sort_by("salary", SortOrder::Ascending)
                .first()
                .await?
                .unwrap();
            assert_eq!(lowest.salary, 100);

            assert_eq!(repo.find(field("department").eq("HR")).first().await?, None);
            assert_eq!(repo.find_all().count().await?, 5);
            assert_eq!(repo.find_all().skip(2).limit(2).count().await?, 2);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_query_is_lazy() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;

            let query = repo.find(field("department").eq("Sales"));
            seed(&repo).await?;

            // the query runs when awaited, so it sees the documents inserted after it was built
            assert_eq!(query.count().await?, 3);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_logical_filters() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let either = or(vec![field("salary").eq(100_i64), field("salary").eq(500_i64)]);
            assert_eq!(repo.count(either).await?, 2);

            let both = and(vec![
                field("department").eq("Legal"),
                field("salary").between(400_i64, 450_i64),
            ]);
            assert_eq!(repo.count(both).await?, 1);

            assert_eq!(repo.count(not(field("department").eq("Sales"))).await?, 2);
            assert_eq!(
                repo.count(field("department").in_array(vec!["Sales", "Legal"])).await?,
                5
            );
            assert_eq!(repo.count(field("address.city").eq("Wellington")).await?, 5);
            assert_eq!(repo.count(field("department").regex("^Le")).await?, 2);
            assert_eq!(repo.count(raw(doc! { "salary": { "$mod": [200, 0] } })).await?, 2);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_find_by_field() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let mut cursor = repo.find_by_field("department", "Legal").await?;
            let mut found = 0;
            while let Some(employee) = cursor.try_next().await? {
                assert_eq!(employee.department, "Legal");
                found += 1;
            }
            assert_eq!(found, 2);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_find_by_unknown_field_is_empty() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let found = repo.find_by_field("no_such_field", 1).await?.to_vec().await?;
            assert!(found.is_empty());
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_text_search() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Note> = ctx.repository().await?;
            repo.insert_many(&[
                generate_note("zephyrine harbour survey"),
                generate_note("zephyrine budget"),
                generate_note("unrelated"),
            ])
            .await?;

            assert_eq!(repo.search("zephyrine").count().await?, 2);
            assert_eq!(repo.search("harbour").to_vec().await?.len(), 1);
            assert_eq!(
                repo.find(text("zephyrine").and(field("title").regex("budget")))
                    .count()
                    .await?,
                1
            );
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_aggregate_appends_match() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let pipeline = vec![doc! { "$sort": { "salary": -1 } }];
            let result = repo
                .aggregate(field("department").eq("Sales"), pipeline)
                .await?
                .to_vec()
                .await?;

            let salaries: Vec<i64> = result.iter().map(|e| e.salary).collect();
            assert_eq!(salaries, vec![300, 200, 100]);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}

#[tokio::test]
#[ignore = "needs a MongoDB server, set MONGODB_URI and run with --ignored"]
async fn test_aggregate_with_empty_pipeline() {
    run_test(
        || create_test_context(),
        |ctx| async move {
            let repo: ObjectRepository<Employee> = ctx.repository().await?;
            seed(&repo).await?;

            let everyone = repo.aggregate(all(), vec![]).await?.to_vec().await?;
            assert_eq!(everyone.len(), 5);
            Ok(())
        },
        |ctx| cleanup(ctx),
    )
    .await
}
