pub mod shared {
    pub mod core {
        pub mod numbers;
        pub mod timestamps;
    }
    pub mod infrastructure {
        pub mod vision;
    }
}

pub mod modules {
    pub mod shifts {
        pub mod core {
            pub mod corrections;
            pub mod extraction;
            pub mod normalize;
            pub mod record;
            pub mod shift;
            pub mod validate;
            pub mod vat;
        }
        pub mod use_cases {
            pub mod submit_receipt {
                pub mod command;
                pub mod detect_duplicate;
                pub mod errors;
                pub mod handler;
                pub mod persist;
                pub mod resolve;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod extract_receipt {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_shifts {
                pub mod period;
                pub mod summary;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod get_shift {
                pub mod queries_port;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod master_data;
                pub mod master_data_in_memory;
                pub mod shift_store;
                pub mod shift_store_in_memory;
            }
        }
    }
}

pub mod shell;
