use crate::model::{fields, Entity};
use std::borrow::Borrow;

/// Renders one `"<id> : <name> "` line per task, preserving input order.
///
/// The trailing space is part of the line format that clients already parse.
pub fn format_tasks<I>(tasks: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Borrow<Entity>,
{
    tasks
        .into_iter()
        .map(|task| {
            let task = task.borrow();
            format!(
                "{} : {} ",
                task.key().id,
                task.get_string(fields::NAME).unwrap_or_default()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KeyFactory, Property};

    fn task(id: i64, name: &str) -> Entity {
        Entity::builder(KeyFactory::new("Person").new_key(id))
            .set(fields::NAME, Property::unindexed(name))
            .build()
    }

    #[test]
    fn one_line_per_task_in_input_order() {
        let lines = format_tasks(vec![task(9, "walk dog"), task(2, "buy milk")]);
        assert_eq!(lines, vec!["9 : walk dog ", "2 : buy milk "]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(format_tasks(Vec::<Entity>::new()).is_empty());
    }

    #[test]
    fn accepts_borrowed_entities() {
        let tasks = [task(1, "a")];
        assert_eq!(format_tasks(tasks.iter()), vec!["1 : a "]);
    }

    #[test]
    fn missing_name_renders_empty() {
        let bare = Entity::builder(KeyFactory::new("Person").new_key(4)).build();
        assert_eq!(format_tasks([bare]), vec!["4 :  "]);
    }
}
