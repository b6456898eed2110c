//! Server State
//!
//! 所有 handler 共享的状态，Clone 开销很小 (连接池与发送端都是引用计数)。

use std::sync::Arc;

use check_render::PdfConverter;
use shared::models::CheckStatus;
use sqlx::SqlitePool;

use crate::core::{BackgroundTasks, Config, Result, ServerError, TaskKind};
use crate::db::DbService;
use crate::db::repository::check;
use crate::rendering::{
    CheckStorage, CheckTemplate, RenderJob, RenderJobs, RenderQueue, RenderWorker,
};
use crate::services::CheckService;
use crate::utils::AppError;

/// 服务器状态
///
/// ```ignore
/// let (queue, jobs) = RenderQueue::channel();
/// let state = ServerState::initialize(&config, queue).await?;
/// let tasks = state.start_background_tasks(jobs, converter)?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 渲染任务队列 (发送端)
    pub render_queue: RenderQueue,
    /// PDF 文件存储
    pub storage: CheckStorage,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, pool: SqlitePool, render_queue: RenderQueue) -> Self {
        let storage = CheckStorage::new(&config.media_root);
        Self {
            config,
            pool,
            render_queue,
            storage,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构 (database/, media/pdf/)
    /// 2. 数据库 (打开并执行迁移)
    /// 3. 上次运行遗留的 `new` 出单重新入队
    pub async fn initialize(config: &Config, render_queue: RenderQueue) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_path).await?;
        tracing::info!(path = %config.database_path, "Database ready");

        let state = Self::new(config.clone(), db.pool, render_queue);
        state.requeue_pending().await?;
        Ok(state)
    }

    /// 为所有 `new` 状态的出单投递渲染任务
    ///
    /// 队列只在内存中，进程退出时未完成的任务会丢失；worker 只处理
    /// 仍为 `new` 的出单，重复投递无副作用。
    pub async fn requeue_pending(&self) -> Result<usize> {
        let ids = check::find_ids_by_status(&self.pool, CheckStatus::New)
            .await
            .map_err(AppError::from)?;

        for &check_id in &ids {
            if let Err(e) = self.render_queue.enqueue(RenderJob { check_id }) {
                tracing::error!(check_id, error = %e, "Failed to requeue render job");
            }
        }

        if !ids.is_empty() {
            tracing::info!(count = ids.len(), "Pending checks requeued for rendering");
        }
        Ok(ids.len())
    }

    /// 出单服务
    pub fn check_service(&self) -> CheckService {
        CheckService::new(self.pool.clone(), self.render_queue.clone())
    }

    /// 启动后台任务
    ///
    /// - 转换程序可用性探测 (Warmup)
    /// - PDF 渲染工作者 (Worker)
    pub fn start_background_tasks(
        &self,
        jobs: RenderJobs,
        converter: Arc<dyn PdfConverter>,
    ) -> Result<BackgroundTasks> {
        let template = CheckTemplate::new().map_err(|e| ServerError::Template(e.to_string()))?;
        let mut tasks = BackgroundTasks::new();

        let probe = converter.clone();
        tasks.spawn("converter_probe", TaskKind::Warmup, async move {
            if probe.is_available().await {
                tracing::info!("PDF converter available");
            } else {
                tracing::warn!("PDF converter not available, checks will stay new until it is installed");
            }
        });

        let worker = RenderWorker::new(
            self.pool.clone(),
            self.storage.clone(),
            Arc::new(template),
            converter,
        );
        let shutdown = tasks.shutdown_token();
        tasks.spawn("render_worker", TaskKind::Worker, worker.run(jobs, shutdown));

        tasks.log_summary();
        Ok(tasks)
    }
}
