// 배포 환경에서 상태 확인에 사용한다.
// curl -v http://127.0.0.1:8000/health_check => 200 OK
pub async fn health_check() -> http::StatusCode {
    http::StatusCode::OK
}
