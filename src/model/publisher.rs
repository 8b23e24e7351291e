#[derive(Debug, Clone, PartialEq)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublisherDraft {
    pub name: String,
    pub address: String,
    pub website: Option<String>,
}

impl PublisherDraft {
    pub fn into_publisher(self, id: i64) -> Publisher {
        Publisher {
            id,
            name: self.name,
            address: self.address,
            website: self.website,
        }
    }
}
