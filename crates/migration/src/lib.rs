pub use sea_orm_migration::prelude::*;

mod m20250301_090000_create_course_and_template_tables;
mod m20250301_090100_create_block_and_generation_tables;
mod m20250301_090200_create_asset_and_preset_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_090000_create_course_and_template_tables::Migration),
            Box::new(m20250301_090100_create_block_and_generation_tables::Migration),
            Box::new(m20250301_090200_create_asset_and_preset_tables::Migration),
        ]
    }
}
