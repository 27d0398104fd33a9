//! 扫描观察者实现

use di_abstractions::{Binding, ScanObserver, SkipReason, UnitId};
use infrastructure_common::{ModuleError, TypeKey};
use parking_lot::Mutex;
use std::sync::Arc;

/// 空观察者
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// 观察者集合，将事件分发给所有已注册的观察者
#[derive(Clone, Default)]
pub struct Observers {
    observers: Vec<Arc<dyn ScanObserver>>,
}

impl Observers {
    /// 创建空的观察者集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加观察者
    pub fn add(&mut self, observer: Arc<dyn ScanObserver>) {
        self.observers.push(observer);
    }

    /// 观察者数量
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// 是否没有观察者
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}

impl ScanObserver for Observers {
    fn unit_scanned(&self, unit: &UnitId) {
        for observer in &self.observers {
            observer.unit_scanned(unit);
        }
    }

    fn type_skipped(&self, ty: &TypeKey, reason: SkipReason) {
        for observer in &self.observers {
            observer.type_skipped(ty, reason);
        }
    }

    fn binding_added(&self, binding: &Binding) {
        for observer in &self.observers {
            observer.binding_added(binding);
        }
    }

    fn module_configured(&self, module: &TypeKey) {
        for observer in &self.observers {
            observer.module_configured(module);
        }
    }

    fn module_failed(&self, module: &TypeKey, error: &ModuleError) {
        for observer in &self.observers {
            observer.module_failed(module, error);
        }
    }

    fn dependency_unresolved(&self, dependent: &TypeKey, dependency: &TypeKey) {
        for observer in &self.observers {
            observer.dependency_unresolved(dependent, dependency);
        }
    }
}

/// 扫描事件
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// 定义单元开始扫描
    UnitScanned(UnitId),
    /// 类型被跳过
    TypeSkipped(TypeKey, SkipReason),
    /// 新增了绑定
    BindingAdded(Binding),
    /// 模块配置完成
    ModuleConfigured(TypeKey),
    /// 模块创建或配置失败
    ModuleFailed {
        /// 模块类型
        module: TypeKey,
        /// 错误信息
        message: String,
    },
    /// 依赖的类型不在目录中
    DependencyUnresolved {
        /// 声明依赖的类型
        dependent: TypeKey,
        /// 未找到的类型
        dependency: TypeKey,
    },
}

/// 记录所有扫描事件的观察者
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScanEvent>>,
}

impl RecordingObserver {
    /// 创建新的记录观察者
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的事件
    pub fn events(&self) -> Vec<ScanEvent> {
        self.events.lock().clone()
    }

    /// 清空已记录的事件
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// 已扫描的定义单元
    pub fn scanned_units(&self) -> Vec<UnitId> {
        self.collect(|event| match event {
            ScanEvent::UnitScanned(unit) => Some(unit.clone()),
            _ => None,
        })
    }

    /// 配置成功的模块
    pub fn configured_modules(&self) -> Vec<TypeKey> {
        self.collect(|event| match event {
            ScanEvent::ModuleConfigured(module) => Some(*module),
            _ => None,
        })
    }

    /// 配置失败的模块
    pub fn failed_modules(&self) -> Vec<TypeKey> {
        self.collect(|event| match event {
            ScanEvent::ModuleFailed { module, .. } => Some(*module),
            _ => None,
        })
    }

    /// 新增的绑定
    pub fn added_bindings(&self) -> Vec<Binding> {
        self.collect(|event| match event {
            ScanEvent::BindingAdded(binding) => Some(*binding),
            _ => None,
        })
    }

    fn collect<T>(&self, select: impl Fn(&ScanEvent) -> Option<T>) -> Vec<T> {
        self.events.lock().iter().filter_map(select).collect()
    }

    fn record(&self, event: ScanEvent) {
        self.events.lock().push(event);
    }
}

impl ScanObserver for RecordingObserver {
    fn unit_scanned(&self, unit: &UnitId) {
        self.record(ScanEvent::UnitScanned(unit.clone()));
    }

    fn type_skipped(&self, ty: &TypeKey, reason: SkipReason) {
        self.record(ScanEvent::TypeSkipped(*ty, reason));
    }

    fn binding_added(&self, binding: &Binding) {
        self.record(ScanEvent::BindingAdded(*binding));
    }

    fn module_configured(&self, module: &TypeKey) {
        self.record(ScanEvent::ModuleConfigured(*module));
    }

    fn module_failed(&self, module: &TypeKey, error: &ModuleError) {
        self.record(ScanEvent::ModuleFailed {
            module: *module,
            message: error.to_string(),
        });
    }

    fn dependency_unresolved(&self, dependent: &TypeKey, dependency: &TypeKey) {
        self.record(ScanEvent::DependencyUnresolved {
            dependent: *dependent,
            dependency: *dependency,
        });
    }
}
