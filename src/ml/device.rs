// ============================================================
// Layer 5 — Compute Target
// ============================================================
// Which Burn backend the pipeline runs on. Chosen once at
// startup and then passed down explicitly as a backend type
// parameter plus a device value; nothing reads it globally.
//
//   Cpu → Autodiff<NdArray>  (pure Rust, always available)
//   Gpu → Autodiff<Wgpu>     (Vulkan / Metal / DX12 via wgpu)

use std::{
    panic::{self, AssertUnwindSafe},
    sync::OnceLock,
};

use burn::{
    backend::{
        ndarray::NdArrayDevice,
        wgpu::WgpuDevice,
        Autodiff, NdArray, Wgpu,
    },
    tensor::Tensor,
};
use serde::{Deserialize, Serialize};

pub type CpuBackend = Autodiff<NdArray>;
pub type GpuBackend = Autodiff<Wgpu>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeTarget {
    Cpu,
    Gpu,
}

impl ComputeTarget {
    /// Resolve an optional request. With no preference the GPU backend
    /// is used when wgpu can open an adapter, otherwise the CPU one.
    pub fn resolve(requested: Option<ComputeTarget>) -> Self {
        Self::resolve_with(requested, gpu_available)
    }

    fn resolve_with(requested: Option<ComputeTarget>, gpu_probe: impl FnOnce() -> bool) -> Self {
        let target = match requested {
            Some(target) => target,
            None if gpu_probe() => ComputeTarget::Gpu,
            None => {
                tracing::warn!("No wgpu adapter available, falling back to CPU");
                ComputeTarget::Cpu
            }
        };
        tracing::info!("Compute target: {:?}", target);
        target
    }

    pub fn cpu_device() -> NdArrayDevice {
        NdArrayDevice::Cpu
    }

    pub fn gpu_device() -> WgpuDevice {
        WgpuDevice::default()
    }
}

/// Whether wgpu can run a kernel on its default device.
///
/// cubecl panics while creating the client when no adapter exists, so
/// the first allocation runs under `catch_unwind` with the panic hook
/// silenced. The answer is computed once per process.
pub fn gpu_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        let hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let device = WgpuDevice::default();
            let _ = Tensor::<Wgpu, 1>::zeros([1], &device).into_data();
        }));
        panic::set_hook(hook);
        result.is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_request_wins() {
        assert_eq!(ComputeTarget::resolve(Some(ComputeTarget::Cpu)), ComputeTarget::Cpu);
    }

    #[test]
    fn test_explicit_request_skips_adapter_check() {
        let target = ComputeTarget::resolve_with(Some(ComputeTarget::Gpu), || {
            panic!("adapter check must not run for an explicit request")
        });
        assert_eq!(target, ComputeTarget::Gpu);
    }

    #[test]
    fn test_auto_uses_gpu_when_adapter_exists() {
        assert_eq!(ComputeTarget::resolve_with(None, || true), ComputeTarget::Gpu);
    }

    #[test]
    fn test_auto_falls_back_to_cpu_without_adapter() {
        assert_eq!(ComputeTarget::resolve_with(None, || false), ComputeTarget::Cpu);
    }

    #[test]
    fn test_auto_resolution_never_panics() {
        // Whatever hardware the host has, resolving must pick a target
        // whose backend can be constructed.
        let target = ComputeTarget::resolve(None);
        assert_eq!(target == ComputeTarget::Gpu, gpu_available());
    }
}
