pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod app_store_verify_receipt_datasource;
        pub(crate) mod user_store_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod app_store_verify_receipt {
            pub(crate) mod common;
            pub(crate) mod verify_receipt_request_model;
            pub(crate) mod verify_receipt_response_model;
        }
        pub(crate) mod user_store {
            pub(crate) mod user_record_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_repository_impl;
        pub(crate) mod user_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod app_receipt;
        pub mod eligibility;
        pub mod parsed_receipt;
        pub mod user_record;
    }
    pub mod repositories {
        pub mod receipt_repository;
        pub mod user_repository;
    }
}

pub mod config;
pub mod decider;
pub mod errors;
pub mod http;
