// ==========================================
// 高校排课管理系统 - 参照数据仓储
// ==========================================
// 课程/教师/教室/时间段/授课分配/选课 均为协作方拥有的
// 只读数据，本层只提供查询，不提供写入
// ==========================================

mod assignment;
mod classroom;
mod enrollment;
mod faculty;
mod slot;
mod subject;

pub use self::assignment::AssignmentRepository;
pub use self::classroom::ClassroomRepository;
pub use self::enrollment::EnrollmentRepository;
pub use self::faculty::FacultyRepository;
pub use self::slot::TimeSlotRepository;
pub use self::subject::SubjectRepository;
