use rusqlite::Connection;
use todo_core::db::open_db_in_memory;
use todo_core::{
    Category, CategoryRepository, Item, ItemQuery, ItemRepository, RepoError,
    SqliteCategoryRepository, SqliteItemRepository, ValidationError,
};
use uuid::Uuid;

fn seed_category(conn: &Connection, name: &str) -> Category {
    SqliteCategoryRepository::try_new(conn)
        .unwrap()
        .create_category(name, "61BBFF")
        .unwrap()
}

fn titles(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.title.as_str()).collect()
}

#[test]
fn created_item_is_listed_once_and_not_done() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let created = repo.create_item(work.uuid, "Find Mike").unwrap();
    assert!(!created.done);
    assert_eq!(created.category_id, work.uuid);

    let listed = repo.list_by_category(work.uuid).unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn list_by_category_is_insertion_ordered_and_scoped() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let home = seed_category(&conn, "Home");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    repo.create_item(work.uuid, "Throw the garbage").unwrap();
    repo.create_item(home.uuid, "Water plants").unwrap();
    repo.create_item(work.uuid, "Buy Eggos").unwrap();
    repo.create_item(work.uuid, "Find Mike").unwrap();

    let listed = repo.list_by_category(work.uuid).unwrap();
    assert_eq!(
        titles(&listed),
        vec!["Throw the garbage", "Buy Eggos", "Find Mike"]
    );
    assert_eq!(titles(&repo.list_by_category(home.uuid).unwrap()), vec!["Water plants"]);
}

#[test]
fn create_under_unknown_category_returns_not_found_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.create_item(missing, "Orphan").unwrap_err();
    assert!(matches!(err, RepoError::CategoryNotFound(id) if id == missing));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn blank_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let err = repo.create_item(work.uuid, "   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyItemTitle)
    ));
    assert!(repo.list_by_category(work.uuid).unwrap().is_empty());
}

#[test]
fn list_for_unknown_category_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let err = repo.list_by_category(Uuid::new_v4()).unwrap_err();
    assert!(err.is_not_found());
    let err = repo.search_items(Uuid::new_v4(), "mike").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn toggle_done_is_its_own_inverse() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let item = repo.create_item(work.uuid, "Find Mike").unwrap();

    let toggled = repo.toggle_done(item.uuid).unwrap();
    assert!(toggled.done);
    assert!(repo.get_item(item.uuid).unwrap().unwrap().done);

    let restored = repo.toggle_done(item.uuid).unwrap();
    assert_eq!(restored.done, item.done);
    assert_eq!(restored.title, item.title);
}

#[test]
fn toggle_unknown_item_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.toggle_done(missing).unwrap_err();
    assert!(matches!(err, RepoError::ItemNotFound(id) if id == missing));
}

#[test]
fn delete_removes_item_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let mike = repo.create_item(work.uuid, "Find Mike").unwrap();
    let eggos = repo.create_item(work.uuid, "Buy Eggos").unwrap();

    repo.delete_item(mike.uuid).unwrap();
    assert_eq!(repo.list_by_category(work.uuid).unwrap(), vec![eggos]);

    let err = repo.delete_item(mike.uuid).unwrap_err();
    assert!(matches!(err, RepoError::ItemNotFound(id) if id == mike.uuid));
}

#[test]
fn search_is_case_insensitive_substring() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "Find Mike").unwrap();
    repo.create_item(work.uuid, "Buy Eggos").unwrap();

    let hits = repo.search_items(work.uuid, "mike").unwrap();
    assert_eq!(titles(&hits), vec!["Find Mike"]);

    let hits = repo.search_items(work.uuid, "EGG").unwrap();
    assert_eq!(titles(&hits), vec!["Buy Eggos"]);

    assert!(repo.search_items(work.uuid, "milk").unwrap().is_empty());
}

#[test]
fn search_ignores_diacritics_on_both_sides() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Errands");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "Café au lait").unwrap();
    repo.create_item(work.uuid, "Naive tea").unwrap();

    assert_eq!(titles(&repo.search_items(work.uuid, "cafe").unwrap()), vec!["Café au lait"]);
    assert_eq!(titles(&repo.search_items(work.uuid, "NAÏVE").unwrap()), vec!["Naive tea"]);
}

#[test]
fn search_orders_by_title_and_stays_in_category() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let home = seed_category(&conn, "Home");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "Call plumber").unwrap();
    repo.create_item(work.uuid, "Answer call").unwrap();
    repo.create_item(home.uuid, "Call mom").unwrap();
    repo.create_item(work.uuid, "Buy milk").unwrap();

    let hits = repo.search_items(work.uuid, "call").unwrap();
    assert_eq!(titles(&hits), vec!["Answer call", "Call plumber"]);
}

#[test]
fn empty_search_equals_insertion_ordered_listing() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "Throw the garbage").unwrap();
    repo.create_item(work.uuid, "Buy Eggos").unwrap();
    repo.create_item(work.uuid, "Find Mike").unwrap();

    let listed = repo.list_by_category(work.uuid).unwrap();
    assert_eq!(repo.search_items(work.uuid, "").unwrap(), listed);
    assert_eq!(repo.list_items(&ItemQuery::all(work.uuid)).unwrap(), listed);
}

#[test]
fn search_that_folds_to_nothing_behaves_like_empty_search() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "Zebra").unwrap();
    repo.create_item(work.uuid, "Apple").unwrap();

    let lone_accent = repo.search_items(work.uuid, "\u{301}").unwrap();
    assert_eq!(titles(&lone_accent), vec!["Zebra", "Apple"]);
    assert_eq!(lone_accent, repo.search_items(work.uuid, "").unwrap());
}

#[test]
fn search_order_ignores_title_case() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Groceries");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "Banana").unwrap();
    repo.create_item(work.uuid, "cherry jam").unwrap();
    repo.create_item(work.uuid, "apple").unwrap();
    repo.create_item(work.uuid, "Éclair au chocolat").unwrap();

    let hits = repo.search_items(work.uuid, "a").unwrap();
    assert_eq!(
        titles(&hits),
        vec!["apple", "Banana", "cherry jam", "Éclair au chocolat"]
    );
}

#[test]
fn search_text_is_not_interpreted_as_pattern() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    repo.create_item(work.uuid, "100% done").unwrap();
    repo.create_item(work.uuid, "1000 things").unwrap();

    assert_eq!(titles(&repo.search_items(work.uuid, "0%").unwrap()), vec!["100% done"]);
    assert!(repo.search_items(work.uuid, "_").unwrap().is_empty());
}

#[test]
fn corrupted_done_value_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let work = seed_category(&conn, "Work");
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let item = repo.create_item(work.uuid, "Find Mike").unwrap();

    conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    conn.execute(
        "UPDATE items SET done = 7 WHERE uuid = ?1;",
        [item.uuid.to_string()],
    )
    .unwrap();

    let err = repo.get_item(item.uuid).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn item_query_folds_filter_and_treats_empty_as_unfiltered() {
    let id = Uuid::new_v4();
    assert_eq!(ItemQuery::all(id).folded_filter(), None);
    assert_eq!(ItemQuery::matching(id, "").folded_filter(), None);
    assert_eq!(ItemQuery::matching(id, "\u{301}").folded_filter(), None);
    assert_eq!(
        ItemQuery::matching(id, "Crème").folded_filter().as_deref(),
        Some("creme")
    );
}
