use tasklist::api::TaskListApi;
use tasklist::datastore::memory::InMemoryDatastore;
use tasklist::datastore::Datastore;
use tasklist::error::{CommandError, TaskListError};
use tasklist::model::{fields, Person};

fn api() -> TaskListApi<InMemoryDatastore> {
    TaskListApi::new(InMemoryDatastore::new())
}

fn names(api: &TaskListApi<InMemoryDatastore>) -> Vec<String> {
    api.list()
        .unwrap()
        .map(|e| Person::from(&e).name)
        .collect()
}

#[test]
fn add_done_delete_lifecycle() {
    let api = api();

    let milk = api.add("buy milk").unwrap();
    let mom = api.add("call mom").unwrap();
    assert_eq!(milk.id, Some(1));
    assert_eq!(mom.id, Some(2));
    assert_eq!(names(&api), vec!["buy milk", "call mom"]);

    assert!(api.mark_done(1).unwrap());
    let done: Vec<Person> = api.list().unwrap().map(|e| Person::from(&e)).collect();
    assert!(done[0].is_done());
    assert!(!done[1].is_done());

    api.delete(1).unwrap();
    assert_eq!(names(&api), vec!["call mom"]);
    assert!(!api.mark_done(1).unwrap());
}

#[test]
fn mark_done_twice_is_idempotent() {
    let api = api();
    let id = api.add("water plants").unwrap().id.unwrap();

    assert!(api.mark_done(id).unwrap());
    assert!(api.mark_done(id).unwrap());

    let entity = api
        .store()
        .get(&api.keys().new_key(id))
        .unwrap()
        .unwrap();
    assert_eq!(entity.get_bool(fields::DONE), Some(true));
    assert_eq!(entity.get_string(fields::NAME), Some("water plants"));
}

#[test]
fn delete_of_unknown_id_is_silent() {
    let api = api();
    api.add("keep me").unwrap();
    api.delete(99).unwrap();
    assert_eq!(names(&api), vec!["keep me"]);
}

#[test]
fn ids_keep_growing_after_deletes() {
    let api = api();
    let first = api.add("a").unwrap().id.unwrap();
    api.delete(first).unwrap();
    let second = api.add("b").unwrap().id.unwrap();
    assert!(second > first);
}

#[test]
fn blank_names_are_rejected() {
    let api = api();
    let err = api.add("   ").unwrap_err();
    assert!(matches!(
        err,
        TaskListError::Command(CommandError::EmptyName)
    ));
    assert_eq!(api.list().unwrap().count(), 0);
}

#[test]
fn list_formatted_matches_listing() {
    let api = api();
    api.add("one").unwrap();
    api.add("two").unwrap();
    let from_list = api.format_tasks(api.list().unwrap());
    assert_eq!(from_list, api.list_formatted().unwrap());
    assert_eq!(from_list, vec!["1 : one ", "2 : two "]);
}
