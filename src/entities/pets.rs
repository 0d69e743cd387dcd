use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub age: Option<f32>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fosters::Entity")]
    Fosters,
}

impl Related<super::fosters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fosters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
