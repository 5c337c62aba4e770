//! # RateTimer - 控制环节拍器
//!
//! 把循环体锁定在固定频率上：每次迭代末尾调用 [`RateTimer::sleep`]，
//! 睡到下一个节拍点。节拍表基于首次 `sleep` 的时刻推进，循环体耗时
//! 的抖动不会累积成频率漂移。
//!
//! 睡眠使用 `spin_sleep`（OS 睡眠 + 尾部自旋），精度达到微秒级。

use std::time::{Duration, Instant};
use tracing::warn;

/// 固定频率的控制环节拍器
///
/// # Example
///
/// ```no_run
/// use armkit::RateTimer;
///
/// let mut timer = RateTimer::new(1000.0); // 1 kHz 控制环
/// loop {
///     // 读状态 -> 算控制量 -> 发命令
///     timer.sleep();
/// }
/// ```
#[derive(Debug)]
pub struct RateTimer {
    period: Duration,
    start: Instant,
    next_tick: Option<Instant>,
    num_ticks: u64,
}

impl RateTimer {
    /// 创建频率为 `frequency_hz` 的节拍器
    ///
    /// # Panics
    ///
    /// 频率不是正有限值时 panic。
    pub fn new(frequency_hz: f64) -> Self {
        assert!(
            frequency_hz.is_finite() && frequency_hz > 0.0,
            "RateTimer frequency must be positive"
        );
        Self {
            period: Duration::from_secs_f64(1.0 / frequency_hz),
            start: Instant::now(),
            next_tick: None,
            num_ticks: 0,
        }
    }

    /// 节拍频率（Hz）
    pub fn frequency(&self) -> f64 {
        1.0 / self.period.as_secs_f64()
    }

    /// 修改节拍频率，下一次 `sleep` 生效
    pub fn set_frequency(&mut self, frequency_hz: f64) {
        assert!(
            frequency_hz.is_finite() && frequency_hz > 0.0,
            "RateTimer frequency must be positive"
        );
        self.period = Duration::from_secs_f64(1.0 / frequency_hz);
    }

    /// 节拍周期（1 / 频率）
    pub fn period(&self) -> Duration {
        self.period
    }

    /// 自上次重置以来的 `sleep` 次数
    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// 自节拍表锚定以来经过的真实时间
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 自锚定以来的平均循环频率（Hz）
    ///
    /// 不足两个节拍时返回 0。
    pub fn average_frequency(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if self.num_ticks < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.num_ticks - 1) as f64 / elapsed
    }

    /// 重置节拍表和计数，下一次 `sleep` 重新锚定
    pub fn reset(&mut self) {
        self.num_ticks = 0;
        self.next_tick = None;
        self.start = Instant::now();
    }

    /// 睡到下一个节拍点
    ///
    /// 首次调用锚定节拍表（立即返回，不睡）；之后每次睡到
    /// `上一节拍 + period`。循环体超时错过节拍点时不睡并记一条
    /// `warn` 日志，节拍表照常推进（不追帧）。
    pub fn sleep(&mut self) {
        let now = Instant::now();
        let next = match self.next_tick {
            Some(next) => next,
            None => {
                // 首个节拍：以当前时刻锚定
                self.start = now;
                now
            },
        };

        if now < next {
            spin_sleep::sleep(next - now);
        } else if self.num_ticks > 0 {
            let overrun = now - next;
            if overrun > self.period {
                warn!(?overrun, "control loop missed its tick deadline");
            }
        }

        self.next_tick = Some(next + self.period);
        self.num_ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_period_round_trip() {
        let timer = RateTimer::new(100.0);
        assert_eq!(timer.period(), Duration::from_millis(10));
        assert!((timer.frequency() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sleep_paces_the_loop() {
        let mut timer = RateTimer::new(200.0); // 5ms 周期
        let start = Instant::now();
        for _ in 0..5 {
            timer.sleep();
        }
        // 首个节拍锚定不睡，之后 4 个周期
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(timer.num_ticks(), 5);
    }

    #[test]
    fn test_average_frequency_tracks_target() {
        let mut timer = RateTimer::new(500.0);
        for _ in 0..10 {
            timer.sleep();
        }
        let avg = timer.average_frequency();
        // 平均频率不应超过目标太多（慢一点是调度噪声，允许）
        assert!(avg > 0.0 && avg < 600.0, "average frequency: {}", avg);
    }

    #[test]
    fn test_reset_clears_schedule() {
        let mut timer = RateTimer::new(1000.0);
        timer.sleep();
        timer.sleep();
        timer.reset();
        assert_eq!(timer.num_ticks(), 0);

        // 重置后首个节拍重新锚定，立即返回
        let start = Instant::now();
        timer.sleep();
        assert!(start.elapsed() < Duration::from_millis(5));
    }

    #[test]
    #[should_panic(expected = "frequency must be positive")]
    fn test_zero_frequency_panics() {
        let _ = RateTimer::new(0.0);
    }
}
