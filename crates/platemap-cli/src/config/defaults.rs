pub struct DefaultsConfig {
    pub plate_size: u32,
    pub plate_limit: usize,
    pub enforce_capacity: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            plate_size: 96,
            plate_limit: 1,
            enforce_capacity: true,
        }
    }
}
