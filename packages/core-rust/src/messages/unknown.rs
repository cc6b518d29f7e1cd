//! `IUnknown`: opnums 0..3, inherited by every DCOM interface.

use uuid::Uuid;

use crate::orpc::InterfacePointer;
use crate::HResult;

operation_messages! {
    /// Asks the object for another interface it implements.
    QueryInterface {
        request: QueryInterfaceRequest {
            iid: Uuid,
        },
        response: QueryInterfaceResponse {
            object: Option<InterfacePointer>,
        } -> HResult
    }

    /// Increments the object's reference count.
    AddRef {
        request: AddRefRequest {},
        response: AddRefResponse {} -> u32
    }

    /// Decrements the object's reference count.
    Release {
        request: ReleaseRequest {},
        response: ReleaseResponse {} -> u32
    }
}
