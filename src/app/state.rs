// ==========================================
// 卸柜补货汇总 - 应用状态
// ==========================================
// 职责: 持有配置、API 实例与会话表
// 并发: 会话表锁只在查找/增删时持有；每个会话各自加锁
// ==========================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, StockingApi};
use crate::config::ConfigManager;
pub use crate::domain::WorkingSession;
use tracing::{debug, info};
use uuid::Uuid;

type SessionHandle = Arc<Mutex<WorkingSession>>;

/// 应用状态
///
/// 替代进程级全局变量：每个会话的数据集、汇总、拖车记录彼此隔离
pub struct AppState {
    /// 配置
    pub config: Arc<ConfigManager>,

    /// 补货汇总API
    pub stocking_api: Arc<StockingApi>,

    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(config: ConfigManager) -> Self {
        let config = Arc::new(config);
        let stocking_api = Arc::new(StockingApi::new(config.clone()));
        info!(source = ?config.source(), "应用状态初始化完成");

        Self {
            config,
            stocking_api,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> ApiResult<std::sync::MutexGuard<'_, HashMap<String, SessionHandle>>> {
        self.sessions
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话表锁获取失败: {}", e)))
    }

    /// 新建会话，返回会话 ID（UUID v4）
    pub fn open_session(&self) -> ApiResult<String> {
        let id = Uuid::new_v4().to_string();
        self.sessions()?
            .insert(id.clone(), Arc::new(Mutex::new(WorkingSession::new(id.clone()))));
        debug!(session = %id, "会话已创建");
        Ok(id)
    }

    /// 关闭会话；返回会话是否存在
    pub fn close_session(&self, id: &str) -> ApiResult<bool> {
        let removed = self.sessions()?.remove(id).is_some();
        debug!(session = %id, removed, "会话已关闭");
        Ok(removed)
    }

    pub fn session_count(&self) -> ApiResult<usize> {
        Ok(self.sessions()?.len())
    }

    /// 在指定会话上执行操作
    ///
    /// # 参数
    /// - id: 会话 ID
    /// - f: 接收 API 与会话的闭包
    pub fn with_session<R, F>(&self, id: &str, f: F) -> ApiResult<R>
    where
        F: FnOnce(&StockingApi, &mut WorkingSession) -> ApiResult<R>,
    {
        let handle = self
            .sessions()?
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;

        let mut session = handle
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))?;
        f(&self.stocking_api, &mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_isolated() {
        let state = AppState::new(ConfigManager::with_defaults());
        let a = state.open_session().unwrap();
        let b = state.open_session().unwrap();
        assert_ne!(a, b);
        assert_eq!(state.session_count().unwrap(), 2);

        state
            .with_session(&a, |_, session| {
                session.trailers.push(crate::domain::TrailerRecord::new("Trailer#1", 0.0, "a.csv"));
                Ok(())
            })
            .unwrap();

        let b_trailers = state.with_session(&b, |_, s| Ok(s.trailers.len())).unwrap();
        assert_eq!(b_trailers, 0);
    }

    #[test]
    fn test_unknown_session() {
        let state = AppState::new(ConfigManager::with_defaults());
        let result = state.with_session("missing", |_, _| Ok(()));
        assert!(matches!(result, Err(ApiError::SessionNotFound(_))));
        assert!(!state.close_session("missing").unwrap());
    }
}
