pub mod router;
pub mod endpoints {
    pub mod push;
    pub mod status;
}
