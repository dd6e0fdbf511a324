use crate::command::{ConfigParam, DriveCommand};

/// Outbound channel to the rover.
///
/// Both methods are best-effort: they return immediately, never report
/// failure, and do not guarantee delivery. A lost drive command is superseded
/// by the next tick, at the latest after the heartbeat interval.
pub trait CommandSink {
    fn drive(&self, cmd: DriveCommand);

    fn set_parameter(&self, param: &ConfigParam);
}

impl<T: CommandSink + ?Sized> CommandSink for &T {
    fn drive(&self, cmd: DriveCommand) {
        (**self).drive(cmd)
    }

    fn set_parameter(&self, param: &ConfigParam) {
        (**self).set_parameter(param)
    }
}
