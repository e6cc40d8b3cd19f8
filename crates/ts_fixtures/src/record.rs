use ts_schema::derive::Notation;

#[derive(Notation, Default, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub tag: Option<String>,
}
