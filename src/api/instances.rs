// Instance lifecycle: CRUD, connect/disconnect, QR and status.

use super::{instance_path, ApiClient, ApiError, ApiResult, CreateInstanceRequest, Instance};

impl ApiClient {
    /// `GET /instances`, decoded from the `data` envelope.
    pub fn list_instances(&self) -> Result<Vec<Instance>, ApiError> {
        self.get("/instances")?.ensure_success()?.data()
    }

    pub fn create_instance(&self, req: &CreateInstanceRequest) -> ApiResult {
        self.post("/instances", req)
    }

    pub fn get_instance(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, ""))
    }

    pub fn delete_instance(&self, instance_id: &str) -> ApiResult {
        self.delete(&instance_path(instance_id, ""))
    }

    pub fn connect_instance(&self, instance_id: &str) -> ApiResult {
        self.post_empty(&instance_path(instance_id, "/connect"))
    }

    pub fn disconnect_instance(&self, instance_id: &str) -> ApiResult {
        self.post_empty(&instance_path(instance_id, "/disconnect"))
    }

    /// The reply carries the PNG as base64 in `qr_code` while pairing is
    /// pending.
    pub fn get_qr(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/qr"))
    }

    pub fn get_status(&self, instance_id: &str) -> ApiResult {
        self.get(&instance_path(instance_id, "/status"))
    }
}
