//! Request and response shapes for every DMRP interface operation.
//!
//! Each operation has exactly one request and one response record. Requests
//! open with the implicit [`OrpcThis`](crate::OrpcThis) header, responses
//! open with [`OrpcThat`](crate::OrpcThat) and close with the operation's
//! `return` status. Everything in between is the operation's own wire
//! arguments or results.

/// Declares the request/response record pair of one or more operations.
macro_rules! operation_messages {
    ($(
        $(#[$meta:meta])*
        $op:ident {
            request: $Req:ident { $( $(#[$req_meta:meta])* $req_field:ident : $req_ty:ty ),* $(,)? },
            response: $Resp:ident { $( $(#[$resp_meta:meta])* $resp_field:ident : $resp_ty:ty ),* $(,)? }
                -> $ret:ty $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[doc = concat!("\n\nArguments of `", stringify!($op), "`.")]
        #[derive(Debug, Clone, PartialEq, Eq, Default, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $Req {
            pub this: $crate::orpc::OrpcThis,
            $( $(#[$req_meta])* pub $req_field: $req_ty, )*
        }

        #[doc = concat!("Results of `", stringify!($op), "`.")]
        #[derive(Debug, Clone, PartialEq, Eq, Default, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $Resp {
            pub that: $crate::orpc::OrpcThat,
            $( $(#[$resp_meta])* pub $resp_field: $resp_ty, )*
            #[serde(rename = "return")]
            pub return_value: $ret,
        }
    )*};
}

pub mod dm_notify;
pub mod unknown;
pub mod volume_client;
pub mod volume_client3;
pub mod volume_client4;
