mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{buy_milk, buy_oat_milk, TestServer};

#[tokio::test]
async fn create_list_update_delete_lifecycle() -> Result<()> {
    let server = TestServer::spawn().await?;

    // Create as user 1
    let res = server.create_todo(1, &buy_milk()).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.text().await?.is_empty());

    let todos = server.list_todos(1).await?;
    assert_eq!(todos.len(), 1);
    let todo = &todos[0];
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["description"], "2% milk");
    assert_eq!(todo["priority"], 3);
    assert_eq!(todo["complete"], false);
    assert_eq!(todo["owner_id"], 1);
    let id = todo["id"].as_i64().expect("id should be an integer");

    // Invisible to user 2
    let res = server.get_todo(2, id).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Overwrite every field
    let res = server.update_todo(1, id, &buy_oat_milk()).await?;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.json::<String>().await?, "1");

    let res = server.get_todo(1, id).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(
        updated,
        json!({
            "id": id,
            "title": "Buy oat milk",
            "description": "oat",
            "priority": 2,
            "complete": true,
            "owner_id": 1
        })
    );

    // Delete
    let res = server.delete_todo(1, id).await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await?.is_empty());

    let res = server.get_todo(1, id).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Todo not found");

    assert!(server.list_todos(1).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn listings_never_cross_owners() -> Result<()> {
    let server = TestServer::spawn().await?;

    for title in ["Alpha task", "Beta task"] {
        let mut body = buy_milk();
        body["title"] = json!(title);
        assert_eq!(server.create_todo(1, &body).await?.status(), StatusCode::CREATED);
    }
    assert_eq!(server.create_todo(2, &buy_oat_milk()).await?.status(), StatusCode::CREATED);

    let mine = server.list_todos(1).await?;
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|t| t["owner_id"] == 1));

    let theirs = server.list_todos(2).await?;
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0]["owner_id"], 2);

    assert!(server.list_todos(3).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn foreign_todo_cannot_be_changed_or_deleted() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create_todo(1, &buy_milk()).await?;
    let id = server.list_todos(1).await?[0]["id"].as_i64().expect("id");

    let res = server.update_todo(2, id, &buy_oat_milk()).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.delete_todo(2, id).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Owner's copy untouched
    let todo = server.get_todo(1, id).await?.json::<Value>().await?;
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["complete"], false);
    Ok(())
}

#[tokio::test]
async fn missing_and_foreign_ids_look_the_same() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create_todo(1, &buy_milk()).await?;
    let id = server.list_todos(1).await?[0]["id"].as_i64().expect("id");

    let foreign = server.get_todo(2, id).await?;
    let missing = server.get_todo(2, id + 1000).await?;

    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(foreign.json::<Value>().await?, missing.json::<Value>().await?);
    Ok(())
}

#[tokio::test]
async fn missing_ids_are_404_for_every_operation() -> Result<()> {
    let server = TestServer::spawn().await?;

    let responses = vec![
        server.get_todo(1, 42).await?,
        server.update_todo(1, 42, &buy_milk()).await?,
        server.delete_todo(1, 42).await?,
    ];
    for res in responses {
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = res.json::<Value>().await?;
        assert_eq!(body["message"], "Todo not found");
    }
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn client_cannot_choose_owner() -> Result<()> {
    let server = TestServer::spawn().await?;

    let mut body = buy_milk();
    body["owner_id"] = json!(2);
    assert_eq!(server.create_todo(1, &body).await?.status(), StatusCode::CREATED);

    assert!(server.list_todos(2).await?.is_empty());
    let mine = server.list_todos(1).await?;
    assert_eq!(mine[0]["owner_id"], 1);

    // Nor move a todo on update
    let id = mine[0]["id"].as_i64().expect("id");
    let mut update = buy_oat_milk();
    update["owner_id"] = json!(2);
    assert_eq!(server.update_todo(1, id, &update).await?.status(), StatusCode::ACCEPTED);
    assert_eq!(server.list_todos(1).await?[0]["owner_id"], 1);
    Ok(())
}
