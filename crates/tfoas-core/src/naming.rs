/// Title-case a spec name: each space-separated word gets an upper-case first
/// letter and a lower-case remainder. No other separator starts a new word, so
/// `pet_store` becomes `Pet_store`.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// `resource_<name>`
pub fn resource_package(name: &str) -> String {
    format!("resource_{name}")
}

/// `datasource_<name>`
pub fn datasource_package(name: &str) -> String {
    format!("datasource_{name}")
}

/// `provider_<lowercased name>`
pub fn provider_package(name: &str) -> String {
    format!("provider_{}", name.to_lowercase())
}

pub fn resource_impl_file(name: &str) -> String {
    format!("{name}_resource_impl_gen.go")
}

pub fn datasource_impl_file(name: &str) -> String {
    format!("{name}_data_impl_gen.go")
}

pub const PROVIDER_IMPL_FILE: &str = "provider_impl_gen.go";
