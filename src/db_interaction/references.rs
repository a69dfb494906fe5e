use diesel::{dsl::exists, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use thiserror::Error;
use uuid::Uuid;

use crate::schema::{chairs, customers, dining_tables, employee_restaurants, inventory_categories, menu_categories};

// A row named by a write that lives outside the restaurant being written to
#[derive(Error, Debug, PartialEq)]
#[error("{entity} {id} does not belong to this restaurant")]
pub struct ForeignReference{
    pub entity: &'static str,
    pub id: Uuid
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reference{
    Table(Uuid),
    Chair(Uuid),
    Customer(Uuid),
    Employee(Uuid),
    MenuCategory(Uuid),
    InventoryCategory(Uuid)
}

impl Reference {
    pub fn entity(&self) -> &'static str {
        match self {
            Reference::Table(_) => "Table",
            Reference::Chair(_) => "Chair",
            Reference::Customer(_) => "Customer",
            Reference::Employee(_) => "Employee",
            Reference::MenuCategory(_) => "Menu category",
            Reference::InventoryCategory(_) => "Inventory category"
        }
    }

    pub fn id(&self) -> Uuid {
        match *self {
            Reference::Table(id)
            | Reference::Chair(id)
            | Reference::Customer(id)
            | Reference::Employee(id)
            | Reference::MenuCategory(id)
            | Reference::InventoryCategory(id) => id
        }
    }

    fn belongs_to(&self, conn: &mut PgConnection, restaurant_id: Uuid) -> Result<bool, diesel::result::Error> {
        match *self {
            Reference::Table(id) => diesel::select(exists(
                dining_tables::table
                    .filter(dining_tables::table_id.eq(id))
                    .filter(dining_tables::restaurant_id.eq(restaurant_id))
            )).get_result(conn),
            Reference::Chair(id) => diesel::select(exists(
                chairs::table
                    .inner_join(dining_tables::table)
                    .filter(chairs::chair_id.eq(id))
                    .filter(dining_tables::restaurant_id.eq(restaurant_id))
            )).get_result(conn),
            Reference::Customer(id) => diesel::select(exists(
                customers::table
                    .filter(customers::customer_id.eq(id))
                    .filter(customers::restaurant_id.eq(restaurant_id))
            )).get_result(conn),
            Reference::Employee(id) => diesel::select(exists(
                employee_restaurants::table
                    .filter(employee_restaurants::employee_id.eq(id))
                    .filter(employee_restaurants::restaurant_id.eq(restaurant_id))
            )).get_result(conn),
            Reference::MenuCategory(id) => diesel::select(exists(
                menu_categories::table
                    .filter(menu_categories::category_id.eq(id))
                    .filter(menu_categories::restaurant_id.eq(restaurant_id))
            )).get_result(conn),
            Reference::InventoryCategory(id) => diesel::select(exists(
                inventory_categories::table
                    .filter(inventory_categories::category_id.eq(id))
                    .filter(inventory_categories::restaurant_id.eq(restaurant_id))
            )).get_result(conn)
        }
    }
}

// Keeps the foreign keys a write actually sets
pub fn collect_references(candidates: &[Option<Reference>]) -> Vec<Reference> {
    candidates.iter().flatten().copied().collect()
}

// Every referenced row has to belong to `restaurant_id`
pub fn ensure_same_restaurant<E>(
    conn: &mut PgConnection,
    restaurant_id: Uuid,
    references: &[Reference]
) -> Result<(), E>
where
    E: From<diesel::result::Error> + From<ForeignReference>
{
    for reference in references {
        if !reference.belongs_to(conn, restaurant_id)? {
            return Err(ForeignReference{ entity: reference.entity(), id: reference.id() }.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{collect_references, ForeignReference, Reference};

    #[test]
    fn absent_keys_are_not_checked() {
        let table = Uuid::new_v4();
        let references = collect_references(&[
            Some(Reference::Table(table)),
            None::<Uuid>.map(Reference::Chair),
            None
        ]);

        assert_eq!(references, vec![Reference::Table(table)]);
    }

    #[test]
    fn foreign_reference_names_the_row() {
        let id = Uuid::new_v4();
        let reference = Reference::InventoryCategory(id);
        let err = ForeignReference{ entity: reference.entity(), id: reference.id() };

        assert_eq!(err.to_string(), format!("Inventory category {} does not belong to this restaurant", id));
    }
}
